//! Wire types of the inventory backend.
//!
//! Field names follow the backend JSON contract, which uses Portuguese names
//! for most business fields (`nome`, `cidade`, `quantidade`, ...).

use serde::{Deserialize, Serialize};

mod money;

pub use money::{Money, MoneyError};

/// Generic error payload returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub mod user {
    use super::*;
    use chrono::NaiveDateTime;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub nome: String,
        /// Tax id (CPF).
        #[serde(default)]
        pub cpf: Option<String>,
        /// Job title.
        #[serde(default)]
        pub cargo: Option<String>,
        #[serde(default)]
        pub cidade: Option<String>,
        /// Department.
        #[serde(default)]
        pub setor: Option<String>,
        #[serde(default)]
        pub email: Option<String>,
        /// Employee number.
        #[serde(default)]
        pub matricula: Option<String>,
        #[serde(default)]
        pub updated_at: Option<NaiveDateTime>,
    }
}

pub mod equipment {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::{stock::StockEntry, user::User};

    /// A class of equipment (not a physical unit).
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EquipmentType {
        pub id: i64,
        pub nome: String,
        #[serde(default)]
        pub marca: Option<String>,
        #[serde(default)]
        pub modelo: Option<String>,
        #[serde(default)]
        pub especificacoes: Option<String>,
    }

    /// Lifecycle status of one physical unit.
    ///
    /// The backend emits the display values (`disponível`, `em manutenção`)
    /// in payloads but filters on the enum names (`disponivel`,
    /// `em_manutencao`); both decode here.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum EquipmentStatus {
        #[serde(rename = "disponível", alias = "disponivel")]
        Available,
        #[serde(rename = "alocado")]
        Allocated,
        #[serde(rename = "em manutenção", alias = "em_manutencao")]
        InMaintenance,
        #[serde(rename = "baixado")]
        Decommissioned,
    }

    impl EquipmentStatus {
        /// Value accepted by the `status` query filter.
        pub fn query_value(self) -> &'static str {
            match self {
                Self::Available => "disponivel",
                Self::Allocated => "alocado",
                Self::InMaintenance => "em_manutencao",
                Self::Decommissioned => "baixado",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Available => "Disponível",
                Self::Allocated => "Alocado",
                Self::InMaintenance => "Em manutenção",
                Self::Decommissioned => "Baixado",
            }
        }
    }

    /// One individually tracked unit.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EquipmentInstance {
        pub id: i64,
        #[serde(default)]
        pub stock_item_id: Option<i64>,
        #[serde(default)]
        pub stock_item: Option<StockEntry>,
        /// Asset tag.
        #[serde(default)]
        pub patrimonial: Option<String>,
        #[serde(default)]
        pub serial: Option<String>,
        #[serde(default)]
        pub status: Option<EquipmentStatus>,
        #[serde(default)]
        pub current_user_id: Option<i64>,
        #[serde(default)]
        pub current_user: Option<User>,
        #[serde(default)]
        pub assigned_at: Option<NaiveDateTime>,
    }

    impl EquipmentInstance {
        /// Type resolved through the stock entry, when the backend nested it.
        pub fn equipment_type(&self) -> Option<&EquipmentType> {
            self.stock_item
                .as_ref()
                .and_then(|item| item.equipment_type.as_ref())
        }
    }
}

pub mod stock {
    use super::*;
    use chrono::NaiveDate;

    use crate::equipment::EquipmentType;

    /// One intake batch (purchase, donation, import) of a given type.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct StockEntry {
        pub id: i64,
        pub equipment_type_id: i64,
        #[serde(default)]
        pub equipment_type: Option<EquipmentType>,
        /// Invoice number.
        #[serde(default)]
        pub nota_numero: Option<String>,
        /// Invoice date.
        #[serde(default)]
        pub nota_data: Option<NaiveDate>,
        #[serde(default)]
        pub quantidade: i64,
        #[serde(default)]
        pub valor_unitario: Money,
        #[serde(default)]
        pub valor_total: Money,
        /// Source of the batch (purchase, donation, import, ...).
        #[serde(default)]
        pub origem: Option<String>,
    }

    /// Request body for `POST /stock`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct StockNew {
        pub equipment_type_id: i64,
        pub nota_numero: String,
        /// Sent as `YYYY-MM-DD`, or `null` when unknown.
        pub nota_data: Option<NaiveDate>,
        pub quantidade: i64,
        pub valor_unitario: Money,
        pub valor_total: Money,
        pub origem: String,
        /// Per-unit asset tags. The console never sends any.
        pub instances: Vec<serde_json::Value>,
    }
}

pub mod assignment {
    use super::*;

    use crate::equipment::EquipmentInstance;

    /// Request body for `POST /assign`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AssignRequest {
        pub equipment_instance_id: i64,
        pub to_user_id: i64,
        pub note: String,
    }

    /// Request body for `POST /return`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ReturnRequest {
        pub equipment_instance_id: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub note: Option<String>,
    }

    /// Success body of `/assign` and `/return`. Every field is optional: an
    /// empty object is a valid acknowledgement.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct MutationAck {
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub equipment: Option<EquipmentInstance>,
    }
}

pub mod import {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserImportStats {
        pub created: u64,
        pub updated: u64,
        pub errors: u64,
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EquipmentImportStats {
        pub equipment_types_created: u64,
        pub instances_created: u64,
        pub errors: u64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ImportResponse<T> {
        pub stats: T,
        #[serde(default)]
        pub message: Option<String>,
    }
}

pub mod reports {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::{equipment::EquipmentInstance, user::User};

    /// `GET /reports/stock-summary`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
    pub struct StockSummary {
        #[serde(default)]
        pub total: u64,
        #[serde(default)]
        pub disponivel: u64,
        #[serde(default)]
        pub alocado: u64,
        #[serde(default)]
        pub em_manutencao: u64,
        #[serde(default)]
        pub baixado: u64,
        #[serde(default)]
        pub valor_total_investido: Option<Money>,
    }

    /// One row of `GET /reports/value-summary`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ValueSummaryRow {
        pub nome: String,
        #[serde(default)]
        pub marca: Option<String>,
        #[serde(default)]
        pub modelo: Option<String>,
        #[serde(default)]
        pub quantidade: u64,
        #[serde(default)]
        pub valor_total: Option<Money>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum MovementKind {
        #[serde(rename = "destinação", alias = "destinacao")]
        Assignment,
        #[serde(rename = "devolução", alias = "devolucao")]
        Return,
        #[serde(rename = "transferência", alias = "transferencia")]
        Transfer,
        #[serde(rename = "baixa")]
        WriteOff,
    }

    impl MovementKind {
        pub fn label(self) -> &'static str {
            match self {
                Self::Assignment => "destinação",
                Self::Return => "devolução",
                Self::Transfer => "transferência",
                Self::WriteOff => "baixa",
            }
        }
    }

    /// Append-only audit record.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Movement {
        #[serde(default)]
        pub id: Option<i64>,
        #[serde(default)]
        pub date: Option<NaiveDateTime>,
        #[serde(rename = "type")]
        pub kind: Option<MovementKind>,
        pub equipment_instance_id: i64,
        #[serde(default)]
        pub from_user_id: Option<i64>,
        #[serde(default)]
        pub to_user_id: Option<i64>,
        #[serde(default)]
        pub note: Option<String>,
    }

    /// `GET /reports/user/{id}`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct UserReport {
        pub user: User,
        #[serde(default)]
        pub equipment: Vec<EquipmentInstance>,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        #[serde(default)]
        pub timestamp: Option<String>,
    }
}
