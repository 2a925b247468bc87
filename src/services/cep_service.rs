use crate::error::CepError;
use crate::models::CepInfo;
use crate::utils::simulate_latency;
use crate::utils::validation::format_cep;

/// Lookup de CEP sobre una tabla mock (formato ViaCEP). Cualquier código que
/// no esté en la tabla, incompleto o no, es `NotFound`.
pub async fn lookup_cep(cep: &str, latency_ms: u32) -> Result<CepInfo, CepError> {
    simulate_latency(latency_ms).await;

    let formatted = format_cep(cep);
    let found = match formatted.as_str() {
        "01001-000" => Some(("Praça da Sé", "Centro")),
        "04038-001" => Some(("Avenida Paulista", "Bela Vista")),
        _ => None,
    };

    match found {
        Some((street, district)) => {
            log::info!("📮 CEP {} encontrado", formatted);
            Ok(CepInfo {
                cep: formatted,
                logradouro: street.to_string(),
                bairro: district.to_string(),
                localidade: "São Paulo".to_string(),
                uf: "SP".to_string(),
            })
        }
        None => {
            log::warn!("📮 CEP {} no encontrado", formatted);
            Err(CepError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn known_cep_accepts_unformatted_input() {
        let info = block_on(lookup_cep("01001000", 0)).unwrap();
        assert_eq!(info.cep, "01001-000");
        assert_eq!(info.logradouro, "Praça da Sé");
        assert_eq!(info.uf, "SP");
    }

    #[test]
    fn unknown_and_incomplete_cep_are_not_found() {
        assert_eq!(block_on(lookup_cep("99999-999", 0)), Err(CepError::NotFound));
        assert_eq!(block_on(lookup_cep("0100100", 0)), Err(CepError::NotFound));
        assert_eq!(block_on(lookup_cep("123", 0)), Err(CepError::NotFound));
    }
}
