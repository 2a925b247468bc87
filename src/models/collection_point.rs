use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tipos de resíduo aceitos num ponto de coleta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WasteType {
    Papel,
    #[serde(rename = "Plástico")]
    Plastico,
    Vidro,
    Metal,
    #[serde(rename = "Orgânico")]
    Organico,
}

impl WasteType {
    pub const ALL: [WasteType; 5] = [
        WasteType::Papel,
        WasteType::Plastico,
        WasteType::Vidro,
        WasteType::Metal,
        WasteType::Organico,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WasteType::Papel => "Papel",
            WasteType::Plastico => "Plástico",
            WasteType::Vidro => "Vidro",
            WasteType::Metal => "Metal",
            WasteType::Organico => "Orgânico",
        }
    }
}

/// Dirección de un punto de coleta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "bairro")]
    pub district: String,
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "numero")]
    pub number: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionPoint {
    pub id: String,
    #[serde(rename = "usuarioId")]
    pub owner_id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "endereco")]
    pub address: Address,
    #[serde(rename = "coordenadas")]
    pub coordinates: Coordinates,
    #[serde(rename = "tiposResiduos")]
    pub waste_types: Vec<WasteType>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl CollectionPoint {
    pub fn accepts(&self, waste: WasteType) -> bool {
        self.waste_types.contains(&waste)
    }
}

/// Datos editables de un punto (formulario de cadastro/edición)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CollectionPointDraft {
    pub name: String,
    pub description: String,
    pub address: Address,
    pub coordinates: Coordinates,
    pub waste_types: Vec<WasteType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStats {
    pub total_points: usize,
    pub points_by_state: BTreeMap<String, usize>,
    pub points_by_waste_type: BTreeMap<WasteType, usize>,
}

/// Respuesta del lookup de CEP (formato ViaCEP)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CepInfo {
    pub cep: String,
    pub logradouro: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
}

impl CepInfo {
    /// Rellena la dirección conservando el número ya informado
    pub fn fill(&self, address: &mut Address) {
        address.cep = self.cep.clone();
        address.street = self.logradouro.clone();
        address.district = self.bairro.clone();
        address.city = self.localidade.clone();
        address.state = self.uf.clone();
    }
}
