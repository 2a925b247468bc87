// ============================================================================
// COLLECTION POINTS VIEWMODEL - Puntos de coleta del usuario logueado
// ============================================================================

use crate::error::{CepError, CollectionPointError};
use crate::models::{CollectionPoint, CollectionPointDraft, DashboardStats, WasteType};
use crate::services::{lookup_cep, CollectionPointService};
use crate::state::AuthState;
use crate::viewmodels::SubmitError;

const LOGIN_REQUIRED: &str = "Faça login para continuar";

impl From<CollectionPointError> for SubmitError {
    fn from(error: CollectionPointError) -> Self {
        match error {
            CollectionPointError::Invalid(errors) => SubmitError::Fields(errors),
            other => SubmitError::General(other.to_string()),
        }
    }
}

pub struct CollectionPointsViewModel {
    auth: AuthState,
    service: CollectionPointService,
    cep_latency_ms: u32,
}

impl CollectionPointsViewModel {
    pub fn new(auth: AuthState, service: CollectionPointService, cep_latency_ms: u32) -> Self {
        Self {
            auth,
            service,
            cep_latency_ms,
        }
    }

    fn owner_id(&self) -> Result<String, SubmitError> {
        self.auth
            .user()
            .map(|user| user.id)
            .ok_or_else(|| SubmitError::General(LOGIN_REQUIRED.to_string()))
    }

    /// Puntos del usuario logueado (vacío si es anónimo)
    pub fn my_points(&self) -> Vec<CollectionPoint> {
        match self.auth.user() {
            Some(user) => self.service.list_by_owner(&user.id),
            None => Vec::new(),
        }
    }

    pub fn search(&self, query: &str, waste: Option<WasteType>) -> Vec<CollectionPoint> {
        self.service.search(query, waste)
    }

    pub fn dashboard(&self) -> DashboardStats {
        self.service.dashboard_stats()
    }

    pub fn create(&self, draft: CollectionPointDraft) -> Result<CollectionPoint, SubmitError> {
        let owner = self.owner_id()?;
        Ok(self.service.create(&owner, draft)?)
    }

    pub fn update(&self, id: &str, draft: CollectionPointDraft) -> Result<CollectionPoint, SubmitError> {
        let owner = self.owner_id()?;
        Ok(self.service.update(id, &owner, draft)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), SubmitError> {
        let owner = self.owner_id()?;
        Ok(self.service.delete(id, &owner)?)
    }

    /// Rellena la dirección del borrador a partir de su CEP
    pub async fn fill_address_from_cep(&self, draft: &mut CollectionPointDraft) -> Result<(), CepError> {
        let info = lookup_cep(&draft.address.cep, self.cep_latency_ms).await?;
        info.fill(&mut draft.address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, LoginCredentials};
    use crate::services::MockAuthService;
    use crate::utils::MemoryStore;
    use futures::executor::block_on;
    use std::rc::Rc;

    fn setup() -> CollectionPointsViewModel {
        let auth = AuthState::new(Rc::new(MemoryStore::new()), Rc::new(MockAuthService::instant()));
        CollectionPointsViewModel::new(auth, CollectionPointService::seeded(), 0)
    }

    fn draft() -> CollectionPointDraft {
        CollectionPointDraft {
            name: "Ponto Paulista".to_string(),
            description: "Coleta de vidro".to_string(),
            address: Address {
                cep: "04038001".to_string(),
                number: "1500".to_string(),
                ..Default::default()
            },
            waste_types: vec![WasteType::Vidro],
            ..Default::default()
        }
    }

    #[test]
    fn anonymous_user_cannot_create() {
        let vm = setup();
        assert!(vm.my_points().is_empty());

        let mut draft = draft();
        block_on(vm.fill_address_from_cep(&mut draft)).unwrap();
        assert_eq!(
            vm.create(draft),
            Err(SubmitError::General(LOGIN_REQUIRED.to_string()))
        );
    }

    #[test]
    fn logged_user_manages_own_points() {
        let vm = setup();
        block_on(vm.auth.login(LoginCredentials::new("joao@email.com", "senha123"))).unwrap();

        let mut draft = draft();
        assert!(matches!(vm.create(draft.clone()), Err(SubmitError::Fields(_))));

        block_on(vm.fill_address_from_cep(&mut draft)).unwrap();
        assert_eq!(draft.address.street, "Avenida Paulista");
        assert_eq!(draft.address.number, "1500");

        let created = vm.create(draft.clone()).unwrap();
        assert_eq!(vm.my_points(), vec![created.clone()]);

        let renamed = CollectionPointDraft {
            name: "Ponto Paulista 2".to_string(),
            ..draft
        };
        assert_eq!(vm.update(&created.id, renamed).unwrap().name, "Ponto Paulista 2");

        // punto de otro usuario
        assert!(matches!(vm.delete("2"), Err(SubmitError::General(_))));
        vm.delete(&created.id).unwrap();
        assert!(vm.my_points().is_empty());
    }
}
