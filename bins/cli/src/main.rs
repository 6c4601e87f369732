//! Cadastro CLI
//!
//! Runs the form input helpers from the command line, for scripting and for
//! checking what a form would send.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cadastro_core::cep::{cep_digits, format_cep};
use cadastro_core::cpf::{Cpf, format_cpf};
use cadastro_core::currency::{format_currency_brl, mask_price_input, parse_currency_brl};
use cadastro_core::forms::{
    FormMode, Product, ProductForm, ProductPayload, ROWS_PER_PAGE, RegistrationForm, UserPayload,
    ValidationErrors, filter_products, page_count, paginate, request_body,
};
use cadastro_core::session::{AuthState, Route, RouteDecision, guard, page_param};
use cadastro_shared::{AppConfig, AppError};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "cadastro", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// CPF mask and check digits
    #[command(subcommand)]
    Cpf(CpfCommand),

    /// Mask a CEP
    Cep { value: String },

    /// BRL currency helpers
    #[command(subcommand)]
    Brl(BrlCommand),

    /// Validate a registration form and print the request
    Register { form: PathBuf },

    /// Validate a product form and print the request
    Product {
        form: PathBuf,

        /// Update the product with this id instead of creating one
        #[arg(long, value_name = "ID")]
        edit: Option<String>,

        /// URL of the stored product image
        #[arg(long, value_name = "URL", default_value = "")]
        image: String,
    },

    /// Search a product list and print one page of it
    List {
        products: PathBuf,

        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,

        /// List path carrying the `page` query parameter
        #[arg(long, default_value = "/products")]
        path: String,
    },

    /// Decide whether a path renders or redirects
    Route {
        path: String,

        /// Stored session snapshot
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum CpfCommand {
    /// Insert the `###.###.###-##` punctuation
    Format { value: String },
    /// Check the CPF digits
    Validate { value: String },
}

#[derive(Subcommand, Debug)]
enum BrlCommand {
    /// Format a number as BRL
    Format { value: String },
    /// Read an amount back from BRL text
    Parse { value: String },
    /// Apply the price mask to typed digits
    Mask { value: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadastro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let output = run(cli.command, &config)?;
    println!("{output}");

    Ok(())
}

/// Runs one command and returns what it prints.
fn run(command: Command, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Cpf(CpfCommand::Format { value }) => Ok(format_cpf(&value)),
        Command::Cpf(CpfCommand::Validate { value }) => {
            let cpf = Cpf::parse(&value).map_err(AppError::from)?;
            Ok(format!("valid: {cpf}"))
        }
        Command::Cep { value } => {
            let formatted = format_cep(&value);
            match cep_digits(&formatted) {
                Some(digits) => Ok(format!("{formatted} ({digits})")),
                None => Ok(formatted),
            }
        }
        Command::Brl(BrlCommand::Format { value }) => Ok(format_currency_brl(&value)),
        Command::Brl(BrlCommand::Parse { value }) => {
            Ok(parse_currency_brl(&value).normalize().to_string())
        }
        Command::Brl(BrlCommand::Mask { value }) => Ok(mask_price_input(&value)),
        Command::Register { form } => register(&form, config),
        Command::Product { form, edit, image } => product(&form, edit.as_deref(), image, config),
        Command::List {
            products,
            search,
            path,
        } => list(&products, &search, &path),
        Command::Route { path, session } => route(&path, session.as_deref()),
    }
}

fn register(path: &Path, config: &AppConfig) -> anyhow::Result<String> {
    let form: RegistrationForm = read_json(path, "registration form")?;

    let payload = form.into_payload().map_err(report)?;
    info!(email = %payload.email, "registration form accepted");

    Ok(format!(
        "POST {}\n{}",
        config.api.endpoint(UserPayload::ENDPOINT),
        request_body(&payload)?
    ))
}

fn product(
    path: &Path,
    edit_id: Option<&str>,
    image_url: String,
    config: &AppConfig,
) -> anyhow::Result<String> {
    let form: ProductForm = read_json(path, "product form")?;

    let (mode, method) = match edit_id {
        Some(_) => (FormMode::Edit, "PUT"),
        None => (FormMode::Create, "POST"),
    };
    let payload = form
        .into_payload(mode, &config.product, image_url)
        .map_err(report)?;
    info!(?mode, name = %payload.nome, "product form accepted");

    Ok(format!(
        "{method} {}\n{}",
        config.api.endpoint(&ProductPayload::path(edit_id)),
        request_body(&payload)?
    ))
}

fn list(path: &Path, search: &str, list_path: &str) -> anyhow::Result<String> {
    let products: Vec<Product> = read_json(path, "product list")?;

    let filtered = filter_products(&products, search);
    let page = page_param(list_path);
    let pages = page_count(filtered.len(), ROWS_PER_PAGE);

    let mut lines = vec![format!(
        "page {} of {pages} ({} products)",
        page.saturating_add(1),
        filtered.len()
    )];
    lines.extend(
        paginate(&filtered, page, ROWS_PER_PAGE)
            .iter()
            .map(|p| format!("{}\t{}\t{}", p.id, p.nome, p.display_price())),
    );
    Ok(lines.join("\n"))
}

fn route(path: &str, session: Option<&Path>) -> anyhow::Result<String> {
    let auth = match session {
        None => AuthState::restore(None),
        Some(snapshot) => {
            let stored = fs::read_to_string(snapshot)
                .with_context(|| format!("Failed to read {}", snapshot.display()))?;
            AuthState::restore(Some(&stored))
        }
    };

    Ok(match guard(&Route::resolve(path), &auth) {
        RouteDecision::Render => "render".to_string(),
        RouteDecision::Redirect(to) => format!("redirect {to}"),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Invalid {what} in {}", path.display()))
}

/// Logs each rejected field and converts the set into an `AppError`.
fn report(errors: ValidationErrors) -> AppError {
    for error in errors.errors() {
        warn!(field = error.field, message = %error.message, "invalid field");
    }
    errors.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use rstest::rstest;

    fn run_args(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("cadastro").chain(args.iter().copied()))?;
        run(cli.command, &AppConfig::default())
    }

    fn temp_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("cadastro-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["cpf", "format", "52998224725"], "529.982.247-25")]
    #[case(&["cpf", "validate", "529.982.247-25"], "valid: 529.982.247-25")]
    #[case(&["cep", "013101"], "01310-1")]
    #[case(&["cep", "01310100"], "01310-100 (01310100)")]
    #[case(&["brl", "format", "1234.5"], "R$ 1.234,50")]
    #[case(&["brl", "format", "abc"], "R$ 0,00")]
    #[case(&["brl", "format", "--", "-5"], "-R$ 5,00")]
    #[case(&["brl", "parse", "R$ 1.234,50"], "1234.5")]
    #[case(&["brl", "parse", "not a number"], "0")]
    #[case(&["brl", "mask", "123456"], "R$ 1.234,56")]
    #[case(&["route", "/products"], "redirect /")]
    #[case(&["route", "/"], "render")]
    fn test_commands(#[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(run_args(args).unwrap(), expected);
    }

    #[test]
    fn test_invalid_cpf_fails() {
        let err = run_args(&["cpf", "validate", "111.111.111-11"]).unwrap_err();
        assert!(err.to_string().contains("cannot all be the same"));
    }

    fn parse_error(args: &[&str]) -> clap::Error {
        Cli::try_parse_from(std::iter::once("cadastro").chain(args.iter().copied())).unwrap_err()
    }

    #[rstest]
    #[case(&["frobnicate"], ErrorKind::InvalidSubcommand)]
    #[case(&["product", "f.json", "--color", "red"], ErrorKind::UnknownArgument)]
    #[case(&["brl", "format"], ErrorKind::MissingRequiredArgument)]
    fn test_bad_arguments_rejected(#[case] args: &[&str], #[case] kind: ErrorKind) {
        assert_eq!(parse_error(args).kind(), kind);
    }

    #[rstest]
    #[case(&["product", "f.json", "--image"], "--image")]
    #[case(&["product", "f.json", "--edit"], "--edit")]
    #[case(&["route", "/", "--session"], "--session")]
    fn test_option_without_value_names_it(#[case] args: &[&str], #[case] option: &str) {
        assert!(parse_error(args).to_string().contains(option));
    }

    #[test]
    fn test_product_command() {
        let path = temp_file(
            "product.json",
            r#"{"name":"Caneca","price":"R$ 49,90","stock_quantity":3,
                "sales_quantity":1,"brand":"Loja"}"#,
        );
        let output = run_args(&["product", &path, "--edit", "15", "--image", "https://x/y.png"])
            .unwrap();
        assert!(output.starts_with("PUT http://localhost:3000/product/15\n"));
        assert!(output.contains("\"preco\": \"49.9\""));

        // creating needs an image upload
        assert!(run_args(&["product", &path]).is_err());
    }

    #[test]
    fn test_list_command() {
        let products: Vec<_> = (1..=20)
            .map(|i| {
                serde_json::json!({
                    "id": i.to_string(),
                    "nome": format!("Caneca {i}"),
                    "preco": "10",
                })
            })
            .collect();
        let path = temp_file("products.json", &serde_json::to_string(&products).unwrap());

        let output = run_args(&["list", &path, "--path", "/products?page=1"]).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("page 2 of 2 (20 products)"));
        assert_eq!(lines.next(), Some("16\tCaneca 16\tR$ 10,00"));
        assert_eq!(lines.count(), 4);

        let output = run_args(&["list", &path, "--search", "CANECA 2"]).unwrap();
        assert_eq!(output, "page 1 of 1 (2 products)\n2\tCaneca 2\tR$ 10,00\n20\tCaneca 20\tR$ 10,00");
    }

    #[test]
    fn test_route_with_session() {
        let path = temp_file(
            "session.json",
            r#"{"user":{"name":"Ana","email":"ana@example.com","image":""},"token":"t"}"#,
        );
        assert_eq!(
            run_args(&["route", "/register", "--session", &path]).unwrap(),
            "redirect /products"
        );
    }
}
