//! User registration form.

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::ValidateEmail;

use super::error::ValidationErrors;
use crate::cep::is_complete_cep;
use crate::cpf::{FORMATTED_CPF_LENGTH, validate_cpf};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Raw registration form values, as typed (CPF and CEP already masked).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// CPF in masked form (`###.###.###-##`).
    pub cpf: String,
    /// Sex option (`M`, `F` or `O`).
    pub sex: String,
    /// Birth date as entered by the date picker.
    pub birth_date: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// CEP in masked form (`#####-###`).
    pub zip: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Street address.
    pub address: String,
    /// Neighborhood.
    pub neighborhood: String,
    /// Address complement.
    pub complement: String,
}

/// Body of the user creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    /// First name.
    pub nome: String,
    /// Last name.
    pub sobrenome: String,
    /// Masked CPF.
    pub cpf: String,
    /// Sex option.
    pub sexo: String,
    /// Birth date.
    pub dt_nascimento: String,
    /// Masked CEP.
    pub cep: String,
    /// City.
    pub cidade: String,
    /// State.
    pub estado: String,
    /// Street address.
    pub logradouro: String,
    /// Neighborhood.
    pub bairro: String,
    /// Address complement.
    pub complemento: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub senha: String,
}

impl UserPayload {
    /// REST resource the payload is posted to.
    pub const ENDPOINT: &'static str = "user";
}

impl RegistrationForm {
    /// Checks every field and reports all failures at once.
    ///
    /// # Errors
    ///
    /// Returns the rejected fields with their messages.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.check(self.first_name.is_empty(), "first_name", "O nome é obrigatório");
        errors.check(self.last_name.is_empty(), "last_name", "O sobrenome é obrigatório");
        errors.check(
            self.cpf.chars().count() != FORMATTED_CPF_LENGTH || !validate_cpf(&self.cpf),
            "cpf",
            "CPF inválido",
        );
        errors.check(self.sex.is_empty(), "sex", "É obrigatório selecionar uma opção");
        errors.check(
            self.birth_date.is_empty(),
            "birth_date",
            "Data de nascimento é obrigatória",
        );
        errors.check(!is_valid_email(&self.email), "email", "Email inválido");
        errors.check(
            self.password.chars().count() < MIN_PASSWORD_LENGTH,
            "password",
            "A senha deve ter pelo menos 6 caracteres",
        );
        errors.check(!is_complete_cep(&self.zip), "zip", "CEP inválido");
        errors.check(self.city.is_empty(), "city", "Cidade é obrigatória");
        errors.check(self.state.chars().count() < 2, "state", "Estado é obrigatório");
        errors.check(self.address.is_empty(), "address", "Logradouro é obrigatório");
        errors.check(self.neighborhood.is_empty(), "neighborhood", "Bairro é obrigatório");
        errors.check(self.complement.is_empty(), "complement", "Complemento é obrigatório");

        errors.into_result().inspect_err(|errors| {
            debug!(fields = ?errors.fields(), "registration form rejected");
        })
    }

    /// Validates the form and builds the request body.
    ///
    /// # Errors
    ///
    /// Returns the rejected fields if validation fails.
    pub fn into_payload(self) -> Result<UserPayload, ValidationErrors> {
        self.validate()?;

        Ok(UserPayload {
            nome: self.first_name,
            sobrenome: self.last_name,
            cpf: self.cpf,
            sexo: self.sex,
            dt_nascimento: self.birth_date,
            cep: self.zip,
            cidade: self.city,
            estado: self.state,
            logradouro: self.address,
            bairro: self.neighborhood,
            complemento: self.complement,
            email: self.email,
            senha: self.password,
        })
    }
}

/// RFC syntax check, narrowed to what the web form accepts: a dotted local
/// part without leading, trailing or doubled dots, and an alphabetic
/// top-level domain of two or more letters.
fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_'+-.".contains(c))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
