//! Input validation and normalization for Cadastro.
//!
//! This crate contains pure input handling with ZERO network or storage
//! dependencies. Every helper runs on each keystroke of a form field and
//! never panics.
//!
//! # Modules
//!
//! - `cpf` - CPF masking and check-digit validation
//! - `currency` - BRL formatting, lenient parsing and the price mask
//! - `cep` - CEP (postal code) masking
//! - `forms` - Registration and product form rules and payloads
//! - `session` - Session state and route guard

pub mod cep;
pub mod cpf;
pub mod currency;
pub mod forms;
pub mod session;

pub use cep::format_cep;
pub use cpf::{Cpf, CpfError, format_cpf, mask_cpf_input, validate_cpf};
pub use currency::{CurrencyInput, format_currency_brl, mask_price_input, parse_currency_brl};
