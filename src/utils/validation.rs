// ============================================================================
// VALIDACIÓN DE FORMULARIOS
// ============================================================================
// Errores por campo, con los mensajes que muestra la UI (pt-BR).
// Las claves son los nombres de campo de la plataforma (nome, email, cpf...).
// ============================================================================

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{CollectionPointDraft, LoginCredentials, RegisterData};

pub const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+\.\S+").expect("regex de email válida");
    static ref REPEATED_DIGITS_RE: Regex = Regex::new(
        r"^(?:0{11}|1{11}|2{11}|3{11}|4{11}|5{11}|6{11}|7{11}|8{11}|9{11})$"
    )
    .expect("regex de dígitos repetidos válida");
}

/// Errores por campo; vacío = formulario válido
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// La UI limpia el error de un campo cuando el usuario vuelve a escribir
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Verificación básica: 11 dígitos y no todos iguales
pub fn is_valid_cpf(cpf: &str) -> bool {
    let clean = digits(cpf);
    clean.len() == 11 && !REPEATED_DIGITS_RE.is_match(&clean)
}

pub fn is_valid_cep(cep: &str) -> bool {
    digits(cep).len() == 8
}

/// Máscara `NNN.NNN.NNN-NN` aplicada mientras se escribe
pub fn format_cpf(value: &str) -> String {
    let clean: String = digits(value).chars().take(11).collect();
    let mut formatted = String::with_capacity(14);
    for (i, c) in clean.chars().enumerate() {
        match i {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }
        formatted.push(c);
    }
    formatted
}

/// Máscara `NNNNN-NNN`; se descartan dígitos extra
pub fn format_cep(value: &str) -> String {
    let clean: String = digits(value).chars().take(8).collect();
    if clean.len() > 5 {
        format!("{}-{}", &clean[..5], &clean[5..])
    } else {
        clean
    }
}

fn validate_email_field(errors: &mut FormErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert("email", "Email é obrigatório");
    } else if !is_valid_email(email) {
        errors.insert("email", "Email inválido");
    }
}

fn validate_password_field(errors: &mut FormErrors, password: &str) {
    if password.is_empty() {
        errors.insert("senha", "Senha é obrigatória");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert("senha", "Senha deve ter pelo menos 6 caracteres");
    }
}

pub fn validate_login(credentials: &LoginCredentials) -> FormErrors {
    let mut errors = FormErrors::new();
    validate_email_field(&mut errors, &credentials.email);
    validate_password_field(&mut errors, &credentials.password);
    errors
}

pub fn validate_registration(data: &RegisterData) -> FormErrors {
    let mut errors = FormErrors::new();

    if data.name.trim().is_empty() {
        errors.insert("nome", "Nome é obrigatório");
    }

    validate_email_field(&mut errors, &data.email);

    if data.tax_id.trim().is_empty() {
        errors.insert("cpf", "CPF é obrigatório");
    } else if !is_valid_cpf(&data.tax_id) {
        errors.insert("cpf", "CPF inválido");
    }

    if data.birth_date.is_empty() {
        errors.insert("nascimento", "Data de nascimento é obrigatória");
    }

    validate_password_field(&mut errors, &data.password);

    if data.password_confirmation.is_empty() {
        errors.insert("confirmarSenha", "Confirmação de senha é obrigatória");
    } else if !data.passwords_match() {
        errors.insert("confirmarSenha", "Senhas não coincidem");
    }

    errors
}

pub fn validate_collection_point(draft: &CollectionPointDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    let address = &draft.address;

    let required = [
        ("nome", draft.name.as_str(), "Nome do ponto é obrigatório"),
        ("descricao", draft.description.as_str(), "Descrição é obrigatória"),
        ("logradouro", address.street.as_str(), "Logradouro é obrigatório"),
        ("numero", address.number.as_str(), "Número é obrigatório"),
        ("bairro", address.district.as_str(), "Bairro é obrigatório"),
        ("cidade", address.city.as_str(), "Cidade é obrigatória"),
        ("estado", address.state.as_str(), "Estado é obrigatório"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    }

    if address.cep.trim().is_empty() {
        errors.insert("cep", "CEP é obrigatório");
    } else if !is_valid_cep(&address.cep) {
        errors.insert("cep", "CEP inválido");
    }

    if draft.waste_types.is_empty() {
        errors.insert("tiposResiduos", "Selecione pelo menos um tipo de resíduo");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Sex, WasteType};

    fn registration() -> RegisterData {
        RegisterData {
            name: "Ana Souza".to_string(),
            email: "ana@email.com".to_string(),
            tax_id: "529.982.247-25".to_string(),
            sex: Sex::Female,
            birth_date: "1992-03-10".to_string(),
            password: "abc123".to_string(),
            password_confirmation: "abc123".to_string(),
        }
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("joao@email.com"));
        assert!(!is_valid_email("joao@email"));
        assert!(!is_valid_email("joao.email.com"));
    }

    #[test]
    fn cpf_rules() {
        assert!(is_valid_cpf("123.456.789-00"));
        assert!(is_valid_cpf("12345678900"));
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("123.456.789"));
    }

    #[test]
    fn masks() {
        assert_eq!(format_cpf("12345678900"), "123.456.789-00");
        assert_eq!(format_cpf("1234"), "123.4");
        assert_eq!(format_cpf("123.456.789-0099"), "123.456.789-00");
        assert_eq!(format_cep("01001000"), "01001-000");
        assert_eq!(format_cep("0100"), "0100");
        assert_eq!(format_cep("04038-0019"), "04038-001");
    }

    #[test]
    fn login_form_errors() {
        let errors = validate_login(&LoginCredentials::new("", "123"));
        assert_eq!(errors.get("email"), Some("Email é obrigatório"));
        assert_eq!(errors.get("senha"), Some("Senha deve ter pelo menos 6 caracteres"));

        assert!(validate_login(&LoginCredentials::new("joao@email.com", "senha123")).is_empty());
    }

    #[test]
    fn registration_reports_each_field() {
        assert!(validate_registration(&registration()).is_empty());

        let mut data = registration();
        data.name = "  ".to_string();
        data.tax_id = "000.000.000-00".to_string();
        data.password_confirmation = "xyz987".to_string();

        let errors = validate_registration(&data);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("nome"), Some("Nome é obrigatório"));
        assert_eq!(errors.get("cpf"), Some("CPF inválido"));
        assert_eq!(errors.get("confirmarSenha"), Some("Senhas não coincidem"));
    }

    #[test]
    fn collection_point_requires_address_and_waste() {
        let draft = CollectionPointDraft {
            name: "EcoPonto".to_string(),
            description: "Centro".to_string(),
            address: Address {
                cep: "0100".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let errors = validate_collection_point(&draft);
        assert_eq!(errors.get("cep"), Some("CEP inválido"));
        assert!(errors.get("tiposResiduos").is_some());
        assert!(errors.get("cidade").is_some());
        assert!(errors.get("nome").is_none());

        let mut errors = errors;
        errors.clear("cep");
        assert!(errors.get("cep").is_none());

        let valid = CollectionPointDraft {
            address: Address {
                cep: "01001-000".to_string(),
                street: "Praça da Sé".to_string(),
                district: "Centro".to_string(),
                city: "São Paulo".to_string(),
                state: "SP".to_string(),
                number: "S/N".to_string(),
            },
            waste_types: vec![WasteType::Papel],
            ..draft
        };
        assert!(validate_collection_point(&valid).into_result().is_ok());
    }
}
