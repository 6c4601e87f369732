//! Product create/edit form and the product record it edits.

use cadastro_shared::config::ProductRules;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ValidationErrors;
use crate::currency::{format_currency_brl, parse_currency_brl};

/// Whether the form creates a new product or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New product; an image upload is mandatory.
    Create,
    /// Existing product; the current image is kept unless replaced.
    Edit,
}

/// Metadata of a file picked in the image input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUpload {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported by the browser.
    pub mime_type: String,
}

/// Product record as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Product id; empty for the placeholder returned on fetch failure.
    pub id: String,
    /// Name.
    pub nome: String,
    /// Price as a plain decimal string (`"1234.5"`).
    pub preco: String,
    /// Image URL.
    pub image: String,
    /// Units in stock.
    pub qt_estoque: i64,
    /// Units sold.
    pub qt_vendas: i64,
    /// Brand.
    pub marca: String,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Product {
    /// Price formatted for listing and detail views.
    #[must_use]
    pub fn display_price(&self) -> String {
        format_currency_brl(&self.preco)
    }

    /// True for the empty placeholder record.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }
}

/// Raw product form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    /// Product name.
    pub name: String,
    /// Price in masked form (`R$ 1.234,50`).
    pub price: String,
    /// Units in stock.
    pub stock_quantity: i64,
    /// Units sold.
    pub sales_quantity: i64,
    /// Brand.
    pub brand: String,
    /// Newly picked image, if any.
    pub image: Option<ImageUpload>,
}

/// Body of the product create/update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    /// Name.
    pub nome: String,
    /// Price as a plain decimal string.
    pub preco: String,
    /// Units in stock.
    pub qt_estoque: i64,
    /// Units sold.
    pub qt_vendas: i64,
    /// Brand.
    pub marca: String,
    /// Image URL.
    pub image: String,
}

impl ProductPayload {
    /// REST resource the payload is sent to.
    pub const ENDPOINT: &'static str = "product";

    /// Resource path: the collection for creation, the item for updates.
    #[must_use]
    pub fn path(id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}/{id}", Self::ENDPOINT),
            None => Self::ENDPOINT.to_string(),
        }
    }
}

impl ProductForm {
    /// Pre-fills an edit form from an existing record.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.nome.clone(),
            price: if product.preco.is_empty() {
                String::new()
            } else {
                product.display_price()
            },
            stock_quantity: product.qt_estoque,
            sales_quantity: product.qt_vendas,
            brand: product.marca.clone(),
            image: None,
        }
    }

    /// Parsed price; zero when the field cannot be read.
    #[must_use]
    pub fn price_amount(&self) -> Decimal {
        parse_currency_brl(&self.price)
    }

    /// Checks every field and reports all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the rejected fields with their messages.
    pub fn validate(&self, mode: FormMode, rules: &ProductRules) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(self.name.is_empty(), "nome", "O nome do produto é obrigatório");

        if self.price.is_empty() {
            errors.add("preco", "O preço é obrigatório");
        } else if self.price_amount() <= Decimal::ZERO {
            errors.add("preco", "O preço deve ser maior que 0");
        }

        errors.check(
            self.stock_quantity < 1,
            "qt_estoque",
            "A quantidade em estoque deve ser maior que 0",
        );
        errors.check(
            self.sales_quantity < 1,
            "qt_vendas",
            "A quantidade de vendas deve ser maior que 0",
        );
        errors.check(self.brand.is_empty(), "marca", "A marca é obrigatória");

        match &self.image {
            None => errors.check(mode == FormMode::Create, "image", "Imagem é obrigatória"),
            Some(image) => {
                errors.check(
                    mode == FormMode::Create && image.name.is_empty(),
                    "image",
                    "Imagem é obrigatória",
                );
                if image.size > rules.max_image_bytes {
                    errors.add("image", image_size_message(rules.max_image_bytes));
                }
                errors.check(
                    !rules.accepts_mime(&image.mime_type),
                    "image",
                    "Formatos suportados: .jpg, .jpeg, .png, .webp",
                );
            }
        }

        errors.into_result().inspect_err(|errors| {
            debug!(?mode, fields = ?errors.fields(), "product form rejected");
        })
    }

    /// Validates the form and builds the request body.
    ///
    /// `image_url` is the URL stored for the product: a freshly uploaded
    /// image, or the current one when editing without a new upload.
    ///
    /// # Errors
    ///
    /// Returns the rejected fields if validation fails.
    pub fn into_payload(
        self,
        mode: FormMode,
        rules: &ProductRules,
        image_url: String,
    ) -> Result<ProductPayload, ValidationErrors> {
        self.validate(mode, rules)?;

        Ok(ProductPayload {
            preco: self.price_amount().normalize().to_string(),
            nome: self.name,
            qt_estoque: self.stock_quantity,
            qt_vendas: self.sales_quantity,
            marca: self.brand,
            image: image_url,
        })
    }
}

/// "Tamanho máximo de 5MB." for a 5 MB limit; fractional sizes use a
/// decimal comma.
fn image_size_message(max_bytes: u64) -> String {
    let megabytes = Decimal::from_i128_with_scale(i128::from(max_bytes), 6).normalize();
    format!("Tamanho máximo de {}MB.", megabytes.to_string().replace('.', ","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn png(size: u64) -> ImageUpload {
        ImageUpload {
            name: "foto.png".into(),
            size,
            mime_type: "image/png".into(),
        }
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Camiseta".into(),
            price: "R$ 1.234,50".into(),
            stock_quantity: 10,
            sales_quantity: 3,
            brand: "Marca X".into(),
            image: Some(png(1024)),
        }
    }

    #[test]
    fn test_valid_create() {
        assert!(valid_form().validate(FormMode::Create, &ProductRules::default()).is_ok());
    }

    #[test]
    fn test_create_requires_image() {
        let form = ProductForm {
            image: None,
            ..valid_form()
        };
        let rules = ProductRules::default();
        let errors = form.validate(FormMode::Create, &rules).unwrap_err();
        assert_eq!(errors.message_for("image"), Some("Imagem é obrigatória"));
        assert!(form.validate(FormMode::Edit, &rules).is_ok());
    }

    #[test]
    fn test_image_limits() {
        let rules = ProductRules::default();
        let form = ProductForm {
            image: Some(ImageUpload {
                name: "anim.gif".into(),
                size: 6_000_000,
                mime_type: "image/gif".into(),
            }),
            ..valid_form()
        };
        let errors = form.validate(FormMode::Edit, &rules).unwrap_err();
        let messages: Vec<_> = errors.errors().iter().map(|e| e.message.as_ref()).collect();
        assert_eq!(
            messages,
            vec![
                "Tamanho máximo de 5MB.",
                "Formatos suportados: .jpg, .jpeg, .png, .webp"
            ]
        );

        let at_limit = ProductForm {
            image: Some(png(5_000_000)),
            ..valid_form()
        };
        assert!(at_limit.validate(FormMode::Create, &rules).is_ok());
    }

    #[rstest]
    #[case(5_000_000, "Tamanho máximo de 5MB.")]
    #[case(2_500_000, "Tamanho máximo de 2,5MB.")]
    #[case(10_000_000, "Tamanho máximo de 10MB.")]
    fn test_image_size_message_follows_limit(#[case] max: u64, #[case] expected: &str) {
        let rules = ProductRules {
            max_image_bytes: max,
            ..ProductRules::default()
        };
        let form = ProductForm {
            image: Some(png(max + 1)),
            ..valid_form()
        };
        let errors = form.validate(FormMode::Edit, &rules).unwrap_err();
        assert_eq!(errors.message_for("image"), Some(expected));

        let at_limit = ProductForm {
            image: Some(png(max)),
            ..valid_form()
        };
        assert!(at_limit.validate(FormMode::Edit, &rules).is_ok());
    }

    #[test]
    fn test_price_rules() {
        let rules = ProductRules::default();
        let empty = ProductForm {
            price: String::new(),
            ..valid_form()
        };
        assert_eq!(
            empty.validate(FormMode::Create, &rules).unwrap_err().message_for("preco"),
            Some("O preço é obrigatório")
        );

        let zero = ProductForm {
            price: "R$ 0,00".into(),
            ..valid_form()
        };
        assert_eq!(
            zero.validate(FormMode::Create, &rules).unwrap_err().message_for("preco"),
            Some("O preço deve ser maior que 0")
        );
    }

    #[test]
    fn test_quantities_and_required_text() {
        let form = ProductForm {
            name: String::new(),
            brand: String::new(),
            stock_quantity: 0,
            sales_quantity: -1,
            ..valid_form()
        };
        let errors = form
            .validate(FormMode::Create, &ProductRules::default())
            .unwrap_err();
        assert_eq!(errors.fields(), vec!["nome", "qt_estoque", "qt_vendas", "marca"]);
    }

    #[test]
    fn test_payload() {
        let payload = valid_form()
            .into_payload(
                FormMode::Create,
                &ProductRules::default(),
                "https://img.example.com/1.png".into(),
            )
            .unwrap();
        assert_eq!(payload.preco, "1234.5");
        assert_eq!(payload.nome, "Camiseta");
        assert_eq!(payload.image, "https://img.example.com/1.png");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["qt_estoque"], 10);
        assert_eq!(json["marca"], "Marca X");
    }

    #[test]
    fn test_payload_path() {
        assert_eq!(ProductPayload::path(None), "product");
        assert_eq!(ProductPayload::path(Some("42")), "product/42");
    }

    #[test]
    fn test_product_record() {
        let product: Product = serde_json::from_str(
            r#"{"id":"7","nome":"Caneca","preco":"1234.5","image":"x","qt_estoque":4,
                "qt_vendas":2,"marca":"Y","createdAt":"2025-03-21T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(product.display_price(), "R$ 1.234,50");
        assert_eq!(product.created_at, "2025-03-21T10:00:00.000Z");
        assert!(!product.is_placeholder());
        assert!(Product::default().is_placeholder());
    }

    #[test]
    fn test_from_product_prefills_formatted_price() {
        let product = Product {
            id: "7".into(),
            nome: "Caneca".into(),
            preco: "49.9".into(),
            qt_estoque: 4,
            qt_vendas: 2,
            marca: "Y".into(),
            ..Product::default()
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "R$ 49,90");
        assert_eq!(form.price_amount(), dec!(49.9));
        assert!(form.image.is_none());
        assert!(form.validate(FormMode::Edit, &ProductRules::default()).is_ok());

        let unpriced = ProductForm::from_product(&Product::default());
        assert!(unpriced.price.is_empty());
    }
}
