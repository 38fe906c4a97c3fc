//! Wire-level types for the RUES API
//!
//! Upstream field names (Spanish, mixed-case and all-caps, reflecting the
//! literal upstream schema) are preserved verbatim through serde renames;
//! the Rust-side names are idiomatic. Upstream omits fields freely, so
//! everything deserializes with defaults. Normalized views for callers are
//! provided as methods rather than by renaming the raw fields away.

use serde::{Deserialize, Serialize};

/// A search query, one of three mutually exclusive shapes. Serializes as a
/// one-key JSON object: `{"matricula": ...}`, `{"nit": ...}` or
/// `{"razon": ...}`.
#[derive(Debug, Clone, Serialize)]
pub enum SearchQuery {
    /// By registration number
    #[serde(rename = "matricula")]
    Registration(String),
    /// By tax identifier (NIT)
    #[serde(rename = "nit")]
    TaxId(u64),
    /// By company name
    #[serde(rename = "razon")]
    CompanyName(String),
}

/// Response of the advanced-search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub cant_registros: i64,
    #[serde(default)]
    pub fecha_respuesta: String,
    #[serde(default)]
    pub hora_respuesta: String,
    #[serde(default)]
    pub registros: Option<Vec<BusinessRecord>>,
}

impl SearchResponse {
    /// The composite registration identifier of the first matching record,
    /// if any. Empty identifiers count as absent.
    pub fn first_registration_id(&self) -> Option<&str> {
        self.registros
            .as_deref()
            .and_then(|records| records.first())
            .map(|record| record.id_rm.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// A business record as returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessRecord {
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub cod_camara: String,
    #[serde(default)]
    pub dv: String,
    #[serde(default)]
    pub estado_matricula: String,
    /// Composite registration identifier; decomposable with
    /// [`crate::RegistrationId::decompose`].
    #[serde(default)]
    pub id_rm: String,
    #[serde(default)]
    pub matricula: String,
    #[serde(default)]
    pub nit: String,
    #[serde(default)]
    pub nom_camara: String,
    #[serde(default)]
    pub organizacion_juridica: String,
    #[serde(default)]
    pub razon_social: String,
    #[serde(default)]
    pub sigla: String,
    #[serde(default)]
    pub tipo_documento: String,
    #[serde(default)]
    pub ultimo_ano_renovado: String,
}

/// Response of the establishments-by-chamber-and-registration endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstablishmentsResponse {
    #[serde(rename = "cant_Registros", default)]
    pub cant_registros: i64,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub fecha_respuesta: String,
    #[serde(default)]
    pub hora_respuesta: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub registros: Option<Vec<EstablishmentRecord>>,
}

/// Standing of an active establishment, as the upstream spells it.
pub const STANDING_ACTIVE: &str = "ACTIVA";

/// A business establishment record. Upstream uses all-caps field names here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstablishmentRecord {
    #[serde(rename = "CATEGORIA_MATRICULA", default)]
    pub categoria_matricula: String,
    #[serde(rename = "CODIGO_CAMARA", default)]
    pub codigo_camara: String,
    #[serde(rename = "CODIGO_CATEGORIA_MATRICULA", default)]
    pub codigo_categoria_matricula: String,
    #[serde(rename = "CODIGO_CLASE_IDENTIFICACION", default)]
    pub codigo_clase_identificacion: String,
    #[serde(rename = "CODIGO_ESTADO_MATRICULA", default)]
    pub codigo_estado_matricula: String,
    #[serde(rename = "CODIGO_ORGANIZACION_JURIDICA", default)]
    pub codigo_organizacion_juridica: String,
    #[serde(rename = "CODIGO_TIPO_SOCIEDAD", default)]
    pub codigo_tipo_sociedad: String,
    #[serde(rename = "DESC_CAMARA", default)]
    pub desc_camara: String,
    /// Standing: `"ACTIVA"` or `"CANCELADA"`.
    #[serde(rename = "DESC_ESTADO_MATRICULA", default)]
    pub desc_estado_matricula: String,
    #[serde(rename = "DESC_ORGANIZACION_JURIDICA", default)]
    pub desc_organizacion_juridica: String,
    #[serde(rename = "DESC_TIPO_SOCIEDAD", default)]
    pub desc_tipo_sociedad: String,
    #[serde(rename = "DIGITO_VERIFICACION", default)]
    pub digito_verificacion: String,
    #[serde(rename = "FECHA_MATRICULA", default)]
    pub fecha_matricula: String,
    #[serde(rename = "FECHA_RENOVACION", default)]
    pub fecha_renovacion: String,
    #[serde(rename = "MATRICULA", default)]
    pub matricula: String,
    #[serde(rename = "NUMERO_IDENTIFICACION", default)]
    pub numero_identificacion: String,
    #[serde(rename = "RAZON_SOCIAL", default)]
    pub razon_social: String,
    #[serde(rename = "SIGLA", default)]
    pub sigla: String,
    #[serde(rename = "ULTIMO_ANO_RENOVADO", default)]
    pub ultimo_ano_renovado: i64,
}

impl EstablishmentRecord {
    /// Whether the establishment's standing is exactly `"ACTIVA"`.
    pub fn is_active(&self) -> bool {
        self.desc_estado_matricula == STANDING_ACTIVE
    }

    /// Normalized projection used by the disk-backed lookup.
    pub fn to_establishment(&self) -> Establishment {
        Establishment {
            name: self.razon_social.clone(),
            chamber: self.desc_camara.clone(),
            registry: self.matricula.clone(),
        }
    }
}

/// Caller-facing establishment projection; also the cache file row format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Establishment {
    pub name: String,
    pub chamber: String,
    pub registry: String,
}

/// Response of the file (registry dossier) endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileResponse {
    #[serde(default)]
    pub codigo_error: String,
    #[serde(default)]
    pub fecha_respuesta: String,
    #[serde(default)]
    pub hora_respuesta: String,
    #[serde(default)]
    pub mensaje_error: Option<String>,
    #[serde(default)]
    pub registros: Option<FileRecord>,
}

/// The full registry dossier for one registration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRecord {
    #[serde(default)]
    pub camara: String,
    #[serde(default)]
    pub categoria_matricula: String,
    #[serde(default)]
    pub ciiu3: String,
    #[serde(default)]
    pub ciiu4: String,
    #[serde(default)]
    pub clase_identificacion: String,
    #[serde(default)]
    pub cod_camara: String,
    #[serde(default)]
    pub cod_ciiu_act_econ_pri: String,
    #[serde(default)]
    pub cod_ciiu_act_econ_sec: String,
    #[serde(default)]
    pub cod_tipo_sociedad: String,
    #[serde(default)]
    pub desc_ciiu3: String,
    #[serde(default)]
    pub desc_ciiu4: String,
    #[serde(default)]
    pub desc_ciiu_act_econ_pri: String,
    #[serde(default)]
    pub desc_ciiu_act_econ_sec: String,
    #[serde(default)]
    pub dir_comercial: Option<String>,
    #[serde(default)]
    pub dir_fiscal: Option<String>,
    #[serde(default)]
    pub dv: String,
    #[serde(default)]
    pub email_com: Option<String>,
    #[serde(default)]
    pub email_fiscal: Option<String>,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub extincion_dominio: String,
    #[serde(default)]
    pub fecha_actualizacion: String,
    #[serde(default)]
    pub fecha_cancelacion: String,
    #[serde(default)]
    pub fecha_matricula: String,
    #[serde(default)]
    pub fecha_renovacion: String,
    #[serde(default)]
    pub fecha_vigencia: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub indicador_emprendimiento_social: String,
    #[serde(default)]
    pub matricula: String,
    #[serde(default)]
    pub motivo_cancelacion: String,
    #[serde(default)]
    pub mun_comercial: Option<String>,
    #[serde(default)]
    pub mun_fiscal: Option<String>,
    #[serde(default)]
    pub numero_identificacion: String,
    #[serde(default)]
    pub numero_identificacion_2: String,
    #[serde(default)]
    pub organizacion_juridica: String,
    #[serde(default)]
    pub razon_social: String,
    #[serde(default)]
    pub sigla: Option<String>,
    #[serde(default)]
    pub tel_com_1: Option<String>,
    #[serde(default)]
    pub tel_com_2: Option<String>,
    #[serde(default)]
    pub tel_com_3: Option<String>,
    #[serde(default)]
    pub tel_fiscal_1: Option<String>,
    #[serde(default)]
    pub tel_fiscal_2: Option<String>,
    #[serde(default)]
    pub tel_fiscal_3: Option<String>,
    #[serde(default)]
    pub tipo_sociedad: String,
    #[serde(default)]
    pub ultimo_ano_renovado: String,
    #[serde(default)]
    pub url_venta_certificados: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_serializes_as_one_key_object() {
        let json = serde_json::to_value(SearchQuery::TaxId(900000000)).unwrap();
        assert_eq!(json, serde_json::json!({ "nit": 900000000u64 }));

        let json = serde_json::to_value(SearchQuery::Registration("0037256304".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "matricula": "0037256304" }));

        let json = serde_json::to_value(SearchQuery::CompanyName("ACME".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "razon": "ACME" }));
    }

    #[test]
    fn test_establishment_record_upstream_field_names() {
        let record: EstablishmentRecord = serde_json::from_value(serde_json::json!({
            "RAZON_SOCIAL": "PANADERIA LA ESPIGA",
            "DESC_CAMARA": "BOGOTA",
            "MATRICULA": "0037256304",
            "DESC_ESTADO_MATRICULA": "ACTIVA",
            "ULTIMO_ANO_RENOVADO": 2024
        }))
        .unwrap();

        assert!(record.is_active());
        assert_eq!(
            record.to_establishment(),
            Establishment {
                name: "PANADERIA LA ESPIGA".into(),
                chamber: "BOGOTA".into(),
                registry: "0037256304".into(),
            }
        );
    }

    #[test]
    fn test_cancelled_record_is_not_active() {
        let record: EstablishmentRecord = serde_json::from_value(serde_json::json!({
            "DESC_ESTADO_MATRICULA": "CANCELADA"
        }))
        .unwrap();
        assert!(!record.is_active());
    }

    #[test]
    fn test_first_registration_id_skips_empty() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "cant_registros": 1,
            "registros": [{ "id_rm": "" }]
        }))
        .unwrap();
        assert_eq!(response.first_registration_id(), None);

        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "cant_registros": 1,
            "registros": [{ "id_rm": "210037256304", "razon_social": "ACME" }]
        }))
        .unwrap();
        assert_eq!(response.first_registration_id(), Some("210037256304"));
    }

    #[test]
    fn test_loose_upstream_shapes_still_parse() {
        // The mock upstream answers `{"mock": true}`; unknown and missing
        // fields must both be tolerated.
        let response: SearchResponse =
            serde_json::from_value(serde_json::json!({ "mock": true })).unwrap();
        assert!(response.registros.is_none());

        let response: FileResponse =
            serde_json::from_value(serde_json::json!({ "mock": true })).unwrap();
        assert!(response.registros.is_none());
    }
}
