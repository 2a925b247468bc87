use serde::{Deserialize, Serialize};

/// Sexo declarado en el cadastro
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "Outro")]
    Other,
}

/// Identidad del usuario autenticado. Se persiste en `recicla365-user`
/// con los nombres de campo de la plataforma.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "nascimento")]
    pub birth_date: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub struct LoginCredentials {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct RegisterData {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "sexo")]
    pub sex: Sex,
    #[serde(rename = "nascimento")]
    pub birth_date: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "confirmarSenha")]
    pub password_confirmation: String,
}

impl RegisterData {
    pub fn passwords_match(&self) -> bool {
        self.password == self.password_confirmation
    }
}

/// Respuesta del servicio de credenciales (login y cadastro)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    pub message: String,
}

/// Sesión autenticada: usuario y token van siempre juntos
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            user: response.user,
            token: response.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_platform_field_names() {
        let json = r#"{
            "id": "1",
            "nome": "Maria Santos",
            "email": "maria@email.com",
            "cpf": "987.654.321-00",
            "sexo": "Outro",
            "nascimento": "1985-08-22",
            "createdAt": "2024-01-10T14:20:00Z",
            "updatedAt": "2024-01-10T14:20:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Maria Santos");
        assert_eq!(user.tax_id, "987.654.321-00");
        assert_eq!(user.sex, Sex::Other);

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["nome"], "Maria Santos");
        assert_eq!(value["sexo"], "Outro");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn unknown_sex_is_rejected() {
        let json = r#"{"id":"1","nome":"x","email":"x","cpf":"x","sexo":"X",
            "nascimento":"x","createdAt":"x","updatedAt":"x"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }
}
