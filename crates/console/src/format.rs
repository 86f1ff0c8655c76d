//! Display formatting for backend values.
//!
//! Every fallback for a missing nested field lives here, so screens never
//! reach into optional payloads on their own.

use api_types::{
    Money,
    equipment::{EquipmentInstance, EquipmentType},
    stock::StockEntry,
    user::User,
};
use chrono::{NaiveDate, NaiveDateTime};

pub const DASH: &str = "-";
const EQUIPMENT_FALLBACK: &str = "Equipamento";
const HOLDER_FALLBACK: &str = "N/A";

/// `R$ 1.234,56`; a missing amount renders as `R$ 0,00`.
pub fn currency(value: Option<Money>) -> String {
    value.unwrap_or(Money::ZERO).to_string()
}

pub fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

pub fn timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| DASH.to_string())
}

/// Date part only, used for "assigned since".
pub fn since(value: Option<NaiveDateTime>) -> String {
    date(value.map(|dt| dt.date()))
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => DASH,
    }
}

pub fn stock_type_name(entry: &StockEntry) -> &str {
    or_dash(entry.equipment_type.as_ref().map(|t| t.nome.as_str()))
}

pub fn stock_brand(entry: &StockEntry) -> &str {
    or_dash(entry.equipment_type.as_ref().and_then(|t| t.marca.as_deref()))
}

pub fn stock_model(entry: &StockEntry) -> &str {
    or_dash(entry.equipment_type.as_ref().and_then(|t| t.modelo.as_deref()))
}

/// Type name of an instance, `Equipamento` when the backend did not nest it.
pub fn instance_type_name(instance: &EquipmentInstance) -> &str {
    match instance.equipment_type().map(|t| t.nome.as_str()) {
        Some(name) if !name.trim().is_empty() => name,
        _ => EQUIPMENT_FALLBACK,
    }
}

/// Asset tag, then serial, then id.
pub fn instance_identifier(instance: &EquipmentInstance) -> String {
    [instance.patrimonial.as_deref(), instance.serial.as_deref()]
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| instance.id.to_string())
}

/// `Notebook - PAT-001`
pub fn instance_label(instance: &EquipmentInstance) -> String {
    format!(
        "{} - {}",
        instance_type_name(instance),
        instance_identifier(instance)
    )
}

pub fn holder_name(instance: &EquipmentInstance) -> &str {
    instance
        .current_user
        .as_ref()
        .map(|u| u.nome.as_str())
        .unwrap_or(HOLDER_FALLBACK)
}

/// `Ana - Analista (Recife)`
pub fn user_label(user: &User) -> String {
    format!(
        "{} - {} ({})",
        user.nome,
        user.cargo.as_deref().unwrap_or(""),
        user.cidade.as_deref().unwrap_or("")
    )
}

/// `Notebook - Dell Latitude`
pub fn equipment_type_label(kind: &EquipmentType) -> String {
    format!(
        "{} - {} {}",
        kind.nome,
        kind.marca.as_deref().unwrap_or(""),
        kind.modelo.as_deref().unwrap_or("")
    )
    .trim_end()
    .to_string()
}
