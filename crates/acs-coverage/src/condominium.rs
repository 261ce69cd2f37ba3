//! Condominium records and the JSON exchanged with the backend
//!
//! Field names follow the backend's wire format (`torres`, `blocos_ativos`,
//! `status_cobertura`, ...). The backend recomputes coverage on its side; the
//! values sent here are the client's preview.

use crate::assignment::{AcsAssignment, AssignmentRoster};
use crate::calculator::{compute_with, CoverageResult, CoverageStatus, StatusPolicy};
use crate::range::{parse_units, UnitSet};
use crate::result::{AcsResult, CoverageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Visit priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// High
    Alta,
    /// Medium
    #[default]
    Media,
    /// Low
    Baixa,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Alta => "alta",
            Self::Media => "media",
            Self::Baixa => "baixa",
        };
        f.write_str(text)
    }
}

/// Snapshot of the create/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondominiumForm {
    /// Condominium name
    pub nome: String,
    /// Number of blocks/towers
    pub torres: i64,
    /// Number of apartments
    pub apartamentos: i64,
    /// Number of residents
    pub moradores: i64,
    /// Residents with hypertension
    pub hipertensos: i64,
    /// Residents with diabetes
    pub diabeticos: i64,
    /// Pregnant residents
    pub gestantes: i64,
    /// Visit priority
    pub prioridade: Priority,
    /// Responsible agent, if any
    pub acs_responsavel: Option<String>,
    /// Covered blocks as range text
    pub blocos_ativos: String,
    /// Date of the last visit (`YYYY-MM-DD`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultima_visita: Option<String>,
}

impl CondominiumForm {
    /// Create a form with a name and block count
    #[must_use]
    pub fn new(nome: impl Into<String>, torres: i64) -> Self {
        Self {
            nome: nome.into(),
            torres,
            ..Self::default()
        }
    }

    /// Attach an agent and the blocks they cover
    #[must_use]
    pub fn with_acs(mut self, nome: impl Into<String>, blocos: impl Into<String>) -> Self {
        self.acs_responsavel = Some(nome.into());
        self.blocos_ativos = blocos.into();
        self
    }

    /// True when a non-blank agent name is set
    #[must_use]
    pub fn has_acs(&self) -> bool {
        self.acs_responsavel
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }

    /// Checks the backend enforces on creation
    pub fn validate(&self) -> AcsResult<()> {
        if self.nome.trim().is_empty() {
            return Err(CoverageError::validation(
                "nome",
                "Nome do condomínio é obrigatório",
            ));
        }
        if self.torres <= 0 {
            return Err(CoverageError::validation(
                "torres",
                "Número de blocos inválido",
            ));
        }
        Ok(())
    }

    /// Covered units; empty when no agent is named
    #[must_use]
    pub fn covered_units(&self) -> UnitSet {
        if self.has_acs() {
            parse_units(&self.blocos_ativos, self.torres)
        } else {
            UnitSet::new()
        }
    }

    /// Live coverage preview
    #[must_use]
    pub fn coverage(&self, policy: StatusPolicy) -> CoverageResult {
        compute_with(policy, self.torres, &self.covered_units())
    }

    /// Validate and flatten into the body POSTed to the backend
    pub fn into_payload(self, policy: StatusPolicy) -> AcsResult<CondominiumPayload> {
        self.validate()?;
        let coverage = self.coverage(policy);
        debug!(
            nome = %self.nome,
            cobertura = coverage.percentage,
            status = %coverage.status,
            "built condominium payload"
        );

        let has_acs = self.has_acs();
        Ok(CondominiumPayload {
            blocos_cobertos: coverage.covered_count,
            blocos_descobertos: coverage.uncovered_count,
            cobertura: coverage.percentage,
            status_cobertura: coverage.status,
            acs_responsavel: if has_acs { self.acs_responsavel } else { None },
            blocos_ativos: if has_acs { Some(self.blocos_ativos) } else { None },
            nome: self.nome,
            torres: self.torres,
            apartamentos: self.apartamentos,
            moradores: self.moradores,
            hipertensos: self.hipertensos,
            diabeticos: self.diabeticos,
            gestantes: self.gestantes,
            prioridade: self.prioridade,
            ultima_visita: self.ultima_visita,
        })
    }
}

/// JSON body for `/api/novo-condominio` and `/api/atualizar-condominio/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondominiumPayload {
    /// Condominium name
    pub nome: String,
    /// Number of blocks/towers
    pub torres: i64,
    /// Covered blocks
    pub blocos_cobertos: u64,
    /// Uncovered blocks
    pub blocos_descobertos: u64,
    /// Responsible agent
    pub acs_responsavel: Option<String>,
    /// Covered blocks as range text
    pub blocos_ativos: Option<String>,
    /// Number of apartments
    pub apartamentos: i64,
    /// Number of residents
    pub moradores: i64,
    /// Residents with hypertension
    pub hipertensos: i64,
    /// Residents with diabetes
    pub diabeticos: i64,
    /// Pregnant residents
    pub gestantes: i64,
    /// Coverage percentage
    pub cobertura: u8,
    /// Coverage status
    pub status_cobertura: CoverageStatus,
    /// Visit priority
    pub prioridade: Priority,
    /// Date of the last visit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultima_visita: Option<String>,
}

impl CondominiumPayload {
    /// Serialize to the JSON body
    pub fn to_json(&self) -> AcsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Backend status field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// Request accepted
    Sucesso,
    /// Request rejected
    Erro,
}

/// Backend reply envelope: `{status, mensagem?, id?, status_cobertura?}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Outcome
    pub status: ApiStatus,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    /// Id of the created record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Status computed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_cobertura: Option<CoverageStatus>,
}

impl ApiResponse {
    /// Parse a reply body
    pub fn from_json(body: &str) -> AcsResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Check if the backend accepted the request
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ApiStatus::Sucesso
    }

    /// Turn an `erro` reply into an error
    pub fn into_result(self) -> AcsResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CoverageError::rejected(
                self.mensagem
                    .unwrap_or_else(|| "no message".to_string()),
            ))
        }
    }
}

/// Stored condominium as returned by `/api/dados`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condominium {
    /// Record id
    pub id: u64,
    /// Condominium name
    pub nome: String,
    /// Owning team
    pub equipe: String,
    /// Number of blocks/towers
    pub torres: i64,
    /// Covered blocks
    pub blocos_cobertos: u64,
    /// Uncovered blocks
    pub blocos_descobertos: u64,
    /// Primary agent
    pub acs_responsavel: Option<String>,
    /// Primary agent's blocks
    pub blocos_ativos: Option<String>,
    /// Every agent on this condominium
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acs_multiplos: Vec<AcsAssignment>,
    /// Number of apartments
    pub apartamentos: i64,
    /// Number of residents
    pub moradores: i64,
    /// Residents with hypertension
    pub hipertensos: i64,
    /// Residents with diabetes
    pub diabeticos: i64,
    /// Pregnant residents
    pub gestantes: i64,
    /// Coverage percentage
    pub cobertura: u8,
    /// Coverage status
    pub status_cobertura: CoverageStatus,
    /// Visit priority
    pub prioridade: Priority,
    /// Date of the last visit
    pub ultima_visita: Option<String>,
}

impl Condominium {
    /// Agents on this record; older records only carry the primary fields
    #[must_use]
    pub fn assignments(&self) -> Vec<AcsAssignment> {
        if !self.acs_multiplos.is_empty() {
            return self.acs_multiplos.clone();
        }
        self.acs_responsavel
            .as_ref()
            .filter(|n| !n.trim().is_empty())
            .map(|nome| {
                vec![AcsAssignment::new(
                    nome.clone(),
                    self.blocos_ativos.clone().unwrap_or_default(),
                )]
            })
            .unwrap_or_default()
    }

    /// Append an agent, mirror the first agent into the primary fields and
    /// recompute coverage.
    ///
    /// A legacy record that only has the primary fields keeps that agent as
    /// the first entry of `acs_multiplos`.
    pub fn add_acs(&mut self, assignment: AcsAssignment, policy: StatusPolicy) -> CoverageResult {
        let mut roster: AssignmentRoster = self.assignments().into_iter().collect();
        roster.add(assignment);
        self.store_roster(roster);
        self.refresh_coverage(policy)
    }

    /// Remove every entry for `nome`, then mirror and recompute as in
    /// [`Self::add_acs`].
    ///
    /// Removing the last agent clears the primary fields and resets the
    /// record to uncovered.
    pub fn remove_acs(&mut self, nome: &str, policy: StatusPolicy) -> AcsResult<CoverageResult> {
        let mut roster: AssignmentRoster = self.assignments().into_iter().collect();
        let _ = roster.remove(nome)?;
        self.store_roster(roster);
        Ok(self.refresh_coverage(policy))
    }

    fn store_roster(&mut self, roster: AssignmentRoster) {
        match roster.primary() {
            Some(primary) => {
                self.acs_responsavel = Some(primary.nome.clone());
                self.blocos_ativos = Some(primary.blocos.clone());
            }
            None => {
                self.acs_responsavel = None;
                self.blocos_ativos = None;
            }
        }
        self.acs_multiplos = roster.into_assignments();
        debug!(
            id = self.id,
            agents = self.acs_multiplos.len(),
            "updated condominium agents"
        );
    }

    /// Recompute the stored coverage fields from the agents' ranges
    pub fn refresh_coverage(&mut self, policy: StatusPolicy) -> CoverageResult {
        let result = crate::assignment::combined_coverage(self.torres, &self.assignments(), policy);
        self.blocos_cobertos = result.covered_count;
        self.blocos_descobertos = result.uncovered_count;
        self.cobertura = result.percentage;
        self.status_cobertura = result.status;
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod form_tests {
        use super::*;

        #[test]
        fn test_validate_requires_name() {
            let err = CondominiumForm::new("  ", 10).validate().unwrap_err();
            assert!(matches!(err, CoverageError::Validation { ref field, .. } if field == "nome"));
        }

        #[test]
        fn test_validate_requires_positive_towers() {
            let err = CondominiumForm::new("Lucaia", 0).validate().unwrap_err();
            assert!(err.to_string().contains("torres"));
        }

        #[test]
        fn test_coverage_ignored_without_acs() {
            let mut form = CondominiumForm::new("Lucaia", 23);
            form.blocos_ativos = "1-13".to_string();
            assert_eq!(form.coverage(StatusPolicy::default()).covered_count, 0);
        }

        #[test]
        fn test_blank_acs_name_is_no_acs() {
            let form = CondominiumForm::new("Lucaia", 23).with_acs("   ", "1-13");
            assert!(!form.has_acs());
        }

        #[test]
        fn test_coverage_with_acs() {
            let form = CondominiumForm::new("Lucaia", 23).with_acs("Maria Silva", "1-13");
            let result = form.coverage(StatusPolicy::default());
            assert_eq!(result.covered_count, 13);
            assert_eq!(result.percentage, 57);
            assert_eq!(result.status, CoverageStatus::Partial);
        }

        #[test]
        fn test_form_deserializes_with_missing_fields() {
            let form: CondominiumForm =
                serde_json::from_str(r#"{"nome":"Lucaia","torres":23}"#).unwrap();
            assert_eq!(form.prioridade, Priority::Media);
            assert!(form.acs_responsavel.is_none());
        }
    }

    mod payload_tests {
        use super::*;

        #[test]
        fn test_payload_flattens_coverage() {
            let payload = CondominiumForm::new("Lucaia", 23)
                .with_acs("Maria Silva", "1-13,15,20-22")
                .into_payload(StatusPolicy::default())
                .unwrap();
            assert_eq!(payload.blocos_cobertos, 17);
            assert_eq!(payload.blocos_descobertos, 6);
            assert_eq!(payload.cobertura, 74);
            assert_eq!(payload.status_cobertura, CoverageStatus::Complete);
            assert_eq!(payload.acs_responsavel.as_deref(), Some("Maria Silva"));
        }

        #[test]
        fn test_payload_without_acs_nulls_fields() {
            let payload = CondominiumForm::new("Lucaia", 10)
                .into_payload(StatusPolicy::default())
                .unwrap();
            assert!(payload.acs_responsavel.is_none());
            assert!(payload.blocos_ativos.is_none());
            assert_eq!(payload.blocos_descobertos, 10);
            assert_eq!(payload.status_cobertura, CoverageStatus::Uncovered);
        }

        #[test]
        fn test_payload_rejects_invalid_form() {
            let result = CondominiumForm::new("", 10).into_payload(StatusPolicy::default());
            assert!(result.is_err());
        }

        #[test]
        fn test_payload_json_uses_wire_names() {
            let json = CondominiumForm::new("Lucaia", 10)
                .with_acs("Ana", "1-5")
                .into_payload(StatusPolicy::default())
                .unwrap()
                .to_json()
                .unwrap();
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["status_cobertura"], "parcial");
            assert_eq!(value["prioridade"], "media");
            assert_eq!(value["blocos_ativos"], "1-5");
        }
    }

    mod response_tests {
        use super::*;

        #[test]
        fn test_success_response() {
            let response = ApiResponse::from_json(
                r#"{"status":"sucesso","mensagem":"ok","id":7,"status_cobertura":"parcial"}"#,
            )
            .unwrap();
            assert!(response.is_success());
            assert_eq!(response.id, Some(7));
            assert_eq!(response.status_cobertura, Some(CoverageStatus::Partial));
            assert!(response.into_result().is_ok());
        }

        #[test]
        fn test_error_response_becomes_rejected() {
            let response = ApiResponse::from_json(
                r#"{"status":"erro","mensagem":"Equipe não selecionada"}"#,
            )
            .unwrap();
            let err = response.into_result().unwrap_err();
            assert!(err.to_string().contains("Equipe não selecionada"));
        }

        #[test]
        fn test_malformed_response() {
            assert!(matches!(
                ApiResponse::from_json("{"),
                Err(CoverageError::Json(_))
            ));
        }
    }

    mod record_tests {
        use super::*;

        #[test]
        fn test_legacy_record_yields_primary_assignment() {
            let record = Condominium {
                torres: 23,
                acs_responsavel: Some("Maria Silva".into()),
                blocos_ativos: Some("1-13".into()),
                ..Condominium::default()
            };
            let assignments = record.assignments();
            assert_eq!(assignments.len(), 1);
            assert_eq!(assignments[0].blocos, "1-13");
        }

        #[test]
        fn test_refresh_coverage_updates_fields() {
            let mut record = Condominium {
                torres: 23,
                acs_multiplos: vec![
                    AcsAssignment::new("Maria Silva", "1-13"),
                    AcsAssignment::new("João", "14-16"),
                ],
                ..Condominium::default()
            };
            let result = record.refresh_coverage(StatusPolicy::Exact);
            assert_eq!(result.covered_count, 16);
            assert_eq!(record.blocos_cobertos, 16);
            assert_eq!(record.blocos_descobertos, 7);
            assert_eq!(record.cobertura, 70);
            assert_eq!(record.status_cobertura, CoverageStatus::Partial);
        }

        #[test]
        fn test_add_acs_mirrors_first_agent() {
            let mut record = Condominium {
                torres: 20,
                ..Condominium::default()
            };
            record.add_acs(AcsAssignment::new("Maria", "1-10"), StatusPolicy::default());
            let result = record.add_acs(AcsAssignment::new("João", "8-15"), StatusPolicy::default());

            assert_eq!(record.acs_multiplos.len(), 2);
            assert_eq!(record.acs_responsavel.as_deref(), Some("Maria"));
            assert_eq!(record.blocos_ativos.as_deref(), Some("1-10"));
            assert_eq!(result.covered_count, 15);
            assert_eq!(record.blocos_cobertos, 15);
            assert_eq!(record.blocos_descobertos, 5);
            assert_eq!(record.cobertura, 75);
            assert_eq!(record.status_cobertura, CoverageStatus::Complete);
        }

        #[test]
        fn test_add_acs_keeps_legacy_primary() {
            let mut record = Condominium {
                torres: 23,
                acs_responsavel: Some("Maria Silva".into()),
                blocos_ativos: Some("1-13".into()),
                ..Condominium::default()
            };
            record.add_acs(AcsAssignment::new("João", "14-16"), StatusPolicy::default());
            assert_eq!(record.acs_multiplos.len(), 2);
            assert_eq!(record.acs_multiplos[0].nome, "Maria Silva");
            assert_eq!(record.acs_responsavel.as_deref(), Some("Maria Silva"));
            assert_eq!(record.blocos_cobertos, 16);
        }

        #[test]
        fn test_remove_acs_promotes_next_agent() {
            let mut record = Condominium {
                torres: 20,
                ..Condominium::default()
            };
            record.add_acs(AcsAssignment::new("Maria", "1-10"), StatusPolicy::default());
            record.add_acs(AcsAssignment::new("João", "11-12"), StatusPolicy::default());

            let result = record.remove_acs("Maria", StatusPolicy::default()).unwrap();
            assert_eq!(record.acs_responsavel.as_deref(), Some("João"));
            assert_eq!(record.blocos_ativos.as_deref(), Some("11-12"));
            assert_eq!(result.covered_count, 2);
            assert_eq!(record.cobertura, 10);
            assert_eq!(record.status_cobertura, CoverageStatus::Uncovered);
        }

        #[test]
        fn test_removing_last_agent_resets_record() {
            let mut record = Condominium {
                torres: 23,
                ..Condominium::default()
            };
            record.add_acs(AcsAssignment::new("Maria", "1-13"), StatusPolicy::default());
            assert_eq!(record.cobertura, 57);

            let result = record.remove_acs("Maria", StatusPolicy::default()).unwrap();
            assert!(record.acs_multiplos.is_empty());
            assert!(record.acs_responsavel.is_none());
            assert!(record.blocos_ativos.is_none());
            assert_eq!(result.covered_count, 0);
            assert_eq!(record.blocos_cobertos, 0);
            assert_eq!(record.blocos_descobertos, 23);
            assert_eq!(record.cobertura, 0);
            assert_eq!(record.status_cobertura, CoverageStatus::Uncovered);

            // a later refresh must not resurrect the removed agent
            record.refresh_coverage(StatusPolicy::default());
            assert_eq!(record.blocos_cobertos, 0);
            assert_eq!(record.status_cobertura, CoverageStatus::Uncovered);
        }

        #[test]
        fn test_remove_unknown_acs() {
            let mut record = Condominium {
                torres: 10,
                cobertura: 40,
                ..Condominium::default()
            };
            let err = record.remove_acs("Ninguém", StatusPolicy::default()).unwrap_err();
            assert!(matches!(err, CoverageError::NotFound { .. }));
            assert_eq!(record.cobertura, 40);
        }

        #[test]
        fn test_record_without_agents() {
            let mut record = Condominium {
                torres: 5,
                cobertura: 80,
                ..Condominium::default()
            };
            record.refresh_coverage(StatusPolicy::default());
            assert_eq!(record.cobertura, 0);
            assert_eq!(record.status_cobertura, CoverageStatus::Uncovered);
        }
    }
}
