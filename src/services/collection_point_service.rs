// ============================================================================
// SERVICIO DE PUNTOS DE COLETA (mock en memoria)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chrono::{SecondsFormat, Utc};

use crate::error::CollectionPointError;
use crate::models::{
    Address, CollectionPoint, CollectionPointDraft, Coordinates, DashboardStats, WasteType,
};
use crate::utils::validation::validate_collection_point;

/// Los clones comparten la misma lista
#[derive(Clone)]
pub struct CollectionPointService {
    points: Rc<RefCell<Vec<CollectionPoint>>>,
    next_id: Rc<Cell<u64>>,
}

impl CollectionPointService {
    pub fn new(points: Vec<CollectionPoint>) -> Self {
        let next_id = points
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            points: Rc::new(RefCell::new(points)),
            next_id: Rc::new(Cell::new(next_id)),
        }
    }

    /// Con los puntos de ejemplo de la plataforma
    pub fn seeded() -> Self {
        Self::new(seed_points())
    }

    pub fn list(&self) -> Vec<CollectionPoint> {
        self.points.borrow().clone()
    }

    pub fn list_by_owner(&self, owner_id: &str) -> Vec<CollectionPoint> {
        self.points
            .borrow()
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<CollectionPoint> {
        self.points.borrow().iter().find(|p| p.id == id).cloned()
    }

    /// Búsqueda sin distinguir mayúsculas en nombre, descripción, ciudad,
    /// barrio y tipos aceptados; opcionalmente filtrada por tipo de resíduo
    pub fn search(&self, query: &str, waste: Option<WasteType>) -> Vec<CollectionPoint> {
        let needle = query.trim().to_lowercase();
        self.points
            .borrow()
            .iter()
            .filter(|p| waste.map_or(true, |w| p.accepts(w)))
            .filter(|p| {
                needle.is_empty()
                    || [&p.name, &p.description, &p.address.city, &p.address.district]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
                    || p.waste_types
                        .iter()
                        .any(|w| w.label().to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn create(
        &self,
        owner_id: &str,
        draft: CollectionPointDraft,
    ) -> Result<CollectionPoint, CollectionPointError> {
        validate_collection_point(&draft).into_result().map_err(CollectionPointError::Invalid)?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let now = now_rfc3339();
        let point = CollectionPoint {
            id: id.to_string(),
            owner_id: owner_id.to_string(),
            name: draft.name,
            description: draft.description,
            address: draft.address,
            coordinates: draft.coordinates,
            waste_types: draft.waste_types,
            created_at: now.clone(),
            updated_at: now,
        };

        log::info!("♻️ Punto de coleta creado: {} ({})", point.name, point.id);
        self.points.borrow_mut().push(point.clone());
        Ok(point)
    }

    pub fn update(
        &self,
        id: &str,
        owner_id: &str,
        draft: CollectionPointDraft,
    ) -> Result<CollectionPoint, CollectionPointError> {
        validate_collection_point(&draft).into_result().map_err(CollectionPointError::Invalid)?;

        let mut points = self.points.borrow_mut();
        let point = points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CollectionPointError::NotFound(id.to_string()))?;
        if point.owner_id != owner_id {
            return Err(CollectionPointError::Forbidden(id.to_string()));
        }

        point.name = draft.name;
        point.description = draft.description;
        point.address = draft.address;
        point.coordinates = draft.coordinates;
        point.waste_types = draft.waste_types;
        point.updated_at = now_rfc3339();

        log::info!("✏️ Punto de coleta actualizado: {}", id);
        Ok(point.clone())
    }

    pub fn delete(&self, id: &str, owner_id: &str) -> Result<(), CollectionPointError> {
        let mut points = self.points.borrow_mut();
        let index = points
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CollectionPointError::NotFound(id.to_string()))?;
        if points[index].owner_id != owner_id {
            return Err(CollectionPointError::Forbidden(id.to_string()));
        }

        points.remove(index);
        log::info!("🗑️ Punto de coleta eliminado: {}", id);
        Ok(())
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        let points = self.points.borrow();
        let mut stats = DashboardStats {
            total_points: points.len(),
            // todos los tipos aparecen en el gráfico, aunque sea con 0
            points_by_waste_type: WasteType::ALL.iter().map(|w| (*w, 0)).collect(),
            ..Default::default()
        };
        for point in points.iter() {
            *stats
                .points_by_state
                .entry(point.address.state.clone())
                .or_insert(0) += 1;
            for waste in &point.waste_types {
                *stats.points_by_waste_type.entry(*waste).or_insert(0) += 1;
            }
        }
        stats
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[allow(clippy::too_many_arguments)]
fn seed_point(
    id: &str,
    owner_id: &str,
    name: &str,
    description: &str,
    address: (&str, &str, &str, &str),
    coordinates: (f64, f64),
    waste_types: Vec<WasteType>,
    created_at: &str,
) -> CollectionPoint {
    let (cep, street, district, number) = address;
    CollectionPoint {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        address: Address {
            cep: cep.to_string(),
            street: street.to_string(),
            district: district.to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            number: number.to_string(),
        },
        coordinates: Coordinates {
            latitude: coordinates.0,
            longitude: coordinates.1,
        },
        waste_types,
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

fn seed_points() -> Vec<CollectionPoint> {
    use WasteType::*;
    vec![
        seed_point(
            "1",
            "1",
            "EcoPonto Centro",
            "Ponto de coleta central com ampla variedade de materiais aceitos",
            ("01001-000", "Praça da Sé", "Centro", "S/N"),
            (-23.5505199, -46.6333094),
            vec![Papel, Plastico, Vidro, Metal],
            "2024-01-20T08:15:00Z",
        ),
        seed_point(
            "2",
            "2",
            "Recicla Verde",
            "Especializado em materiais orgânicos e compostagem",
            ("04038-001", "Avenida Paulista", "Bela Vista", "1000"),
            (-23.5613963, -46.6565712),
            vec![Organico, Papel],
            "2024-01-18T16:45:00Z",
        ),
        seed_point(
            "3",
            "1",
            "ColetaSul Sustentável",
            "Ponto de coleta na zona sul com foco em eletrônicos",
            ("04094-050", "Rua Domingos de Morais", "Vila Mariana", "2564"),
            (-23.5940499, -46.6395307),
            vec![Metal, Plastico],
            "2024-01-22T11:30:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CollectionPointDraft {
        CollectionPointDraft {
            name: name.to_string(),
            description: "Ponto no bairro".to_string(),
            address: Address {
                cep: "20040-020".to_string(),
                street: "Rua da Assembleia".to_string(),
                district: "Centro".to_string(),
                city: "Rio de Janeiro".to_string(),
                state: "RJ".to_string(),
                number: "10".to_string(),
            },
            coordinates: Coordinates::default(),
            waste_types: vec![WasteType::Vidro],
        }
    }

    #[test]
    fn lists_by_owner() {
        let service = CollectionPointService::seeded();
        assert_eq!(service.list().len(), 3);

        let ids: Vec<String> = service.list_by_owner("1").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn search_matches_text_and_waste_type() {
        let service = CollectionPointService::seeded();

        let names: Vec<String> = service.search("vila", None).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["ColetaSul Sustentável"]);

        assert_eq!(service.search("", Some(WasteType::Organico)).len(), 1);
        assert_eq!(service.search("  ", None).len(), 3);
        assert!(service.search("centro", Some(WasteType::Organico)).is_empty());

        let ids: Vec<String> = service.search("orgânico", None).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn create_assigns_next_id_and_validates() {
        let service = CollectionPointService::seeded();
        let created = service.create("u1", draft("Ecoponto Rio")).unwrap();
        assert_eq!(created.id, "4");
        assert_eq!(service.get("4"), Some(created));

        let invalid = CollectionPointDraft {
            waste_types: vec![],
            ..draft("Sem tipos")
        };
        match service.create("u1", invalid) {
            Err(CollectionPointError::Invalid(errors)) => {
                assert!(errors.get("tiposResiduos").is_some())
            }
            other => panic!("resultado inesperado: {:?}", other),
        }
    }

    #[test]
    fn only_owner_can_update_or_delete() {
        let service = CollectionPointService::seeded();

        assert_eq!(
            service.update("2", "1", draft("Outro nome")),
            Err(CollectionPointError::Forbidden("2".to_string()))
        );
        assert_eq!(
            service.delete("9", "1"),
            Err(CollectionPointError::NotFound("9".to_string()))
        );

        let updated = service.update("1", "1", draft("EcoPonto Sé")).unwrap();
        assert_eq!(updated.name, "EcoPonto Sé");
        assert_eq!(updated.created_at, "2024-01-20T08:15:00Z");

        service.delete("1", "1").unwrap();
        assert!(service.get("1").is_none());
    }

    #[test]
    fn dashboard_counts_states_and_waste() {
        let service = CollectionPointService::seeded();
        service.create("u1", draft("Ecoponto Rio")).unwrap();

        let stats = service.dashboard_stats();
        assert_eq!(stats.total_points, 4);
        assert_eq!(stats.points_by_state.get("SP"), Some(&3));
        assert_eq!(stats.points_by_state.get("RJ"), Some(&1));
        assert_eq!(stats.points_by_waste_type.get(&WasteType::Papel), Some(&2));
        assert_eq!(stats.points_by_waste_type.get(&WasteType::Vidro), Some(&2));
    }

    #[test]
    fn empty_dashboard_lists_every_waste_type() {
        let stats = CollectionPointService::new(Vec::new()).dashboard_stats();
        assert_eq!(stats.total_points, 0);
        assert!(stats.points_by_state.is_empty());
        assert_eq!(stats.points_by_waste_type.len(), WasteType::ALL.len());
        assert!(stats.points_by_waste_type.values().all(|count| *count == 0));
    }
}
