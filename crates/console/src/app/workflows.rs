//! Write workflows: local pre-flight checks, dispatch, then a targeted reload
//! on success.

use std::path::PathBuf;

use api_types::{
    Money,
    assignment::{AssignRequest, MutationAck, ReturnRequest},
    stock::{StockEntry, StockNew},
};
use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    app::{
        App,
        tasks::{ImportError, ImportKind, ImportSummary, Task},
        view::{Load, View},
    },
    client::ClientError,
    store::Collection,
};

/// Pre-flight failures. They block submission before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Selecione equipamento e usuário")]
    MissingAssignment,
    #[error("Selecione o tipo de equipamento")]
    MissingEquipmentType,
    #[error("Quantidade inválida")]
    InvalidQuantity,
    #[error("Valor unitário inválido")]
    InvalidUnitValue,
    #[error("Valor total muito alto")]
    TotalOverflow,
    #[error("Data da nota inválida (use AAAA-MM-DD)")]
    InvalidInvoiceDate,
    #[error("Selecione um arquivo")]
    MissingFile,
    #[error("Digite o ID do usuário")]
    MissingUserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockField {
    #[default]
    Type,
    InvoiceNumber,
    InvoiceDate,
    Quantity,
    UnitValue,
    Origin,
}

impl StockField {
    pub fn next(self) -> Self {
        match self {
            Self::Type => Self::InvoiceNumber,
            Self::InvoiceNumber => Self::InvoiceDate,
            Self::InvoiceDate => Self::Quantity,
            Self::Quantity => Self::UnitValue,
            Self::UnitValue => Self::Origin,
            Self::Origin => Self::Type,
        }
    }
}

/// The "add stock entry" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockForm {
    pub type_id: Option<i64>,
    pub type_cursor: usize,
    pub invoice_number: String,
    pub invoice_date: String,
    pub quantity: String,
    pub unit_value: String,
    pub origin: String,
    pub focus: StockField,
}

impl StockForm {
    pub fn field_mut(&mut self, field: StockField) -> Option<&mut String> {
        match field {
            StockField::Type => None,
            StockField::InvoiceNumber => Some(&mut self.invoice_number),
            StockField::InvoiceDate => Some(&mut self.invoice_date),
            StockField::Quantity => Some(&mut self.quantity),
            StockField::UnitValue => Some(&mut self.unit_value),
            StockField::Origin => Some(&mut self.origin),
        }
    }

    /// Total shown while typing; `None` until both numbers parse.
    pub fn total_preview(&self) -> Option<Money> {
        let (quantity, unit) = parse_amounts(self).ok()?;
        unit.checked_mul(quantity)
    }
}

fn parse_amounts(form: &StockForm) -> Result<(i64, Money), ValidationError> {
    let quantity: i64 = form
        .quantity
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidQuantity)?;
    if quantity <= 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    let unit: Money = form
        .unit_value
        .parse()
        .map_err(|_| ValidationError::InvalidUnitValue)?;
    if unit.cents() < 0 {
        return Err(ValidationError::InvalidUnitValue);
    }
    Ok((quantity, unit))
}

/// Empty means no date. Anything else has to be `YYYY-MM-DD`.
fn parse_invoice_date(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidInvoiceDate)
}

/// Builds the create-stock body; the total is `unit * quantity` in centavos.
pub fn build_stock_request(form: &StockForm) -> Result<StockNew, ValidationError> {
    let type_id = form.type_id.ok_or(ValidationError::MissingEquipmentType)?;
    let (quantity, unit) = parse_amounts(form)?;
    let total = unit
        .checked_mul(quantity)
        .ok_or(ValidationError::TotalOverflow)?;
    let nota_data = parse_invoice_date(&form.invoice_date)?;

    Ok(StockNew {
        equipment_type_id: type_id,
        nota_numero: form.invoice_number.trim().to_string(),
        nota_data,
        quantidade: quantity,
        valor_unitario: unit,
        valor_total: total,
        origem: form.origin.trim().to_string(),
        instances: Vec::new(),
    })
}

pub fn build_assign_request(
    equipment_id: Option<i64>,
    user_id: Option<i64>,
    note: &str,
) -> Result<AssignRequest, ValidationError> {
    match (equipment_id, user_id) {
        (Some(equipment_instance_id), Some(to_user_id)) => Ok(AssignRequest {
            equipment_instance_id,
            to_user_id,
            note: note.to_string(),
        }),
        _ => Err(ValidationError::MissingAssignment),
    }
}

pub fn parse_import_path(raw: &str) -> Result<PathBuf, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingFile);
    }
    Ok(PathBuf::from(trimmed))
}

pub fn parse_user_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::MissingUserId)
}

/// User-facing text of a failed request: the backend message verbatim when
/// there is one, `fallback` otherwise.
pub fn failure_message(err: &ClientError, fallback: &str) -> String {
    err.server_message()
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

impl App {
    pub(crate) fn submit_assign(&mut self) {
        let assign = &self.state.assign;
        match build_assign_request(assign.equipment_id, assign.user_id, &assign.note) {
            Ok(payload) => {
                tracing::info!(
                    equipment = payload.equipment_instance_id,
                    user = payload.to_user_id,
                    "assign"
                );
                self.spawn(Task::Assign(payload));
            }
            Err(err) => self.state.notifier.error(err.to_string()),
        }
    }

    pub(crate) fn on_assigned(&mut self, result: Result<MutationAck, ClientError>) {
        match result {
            Ok(_) => {
                self.state.notifier.success("Equipamento destinado com sucesso!");
                self.state.assign.reset_form();
                self.run_load_plan(View::Assign, View::Assign.load_plan());
            }
            Err(err) => {
                self.note_failure(&err);
                self.state
                    .notifier
                    .error(failure_message(&err, "Erro ao destinar equipamento"));
            }
        }
    }

    pub(crate) fn submit_return(&mut self, equipment_instance_id: i64) {
        tracing::info!(equipment = equipment_instance_id, "return");
        self.state.pending_return = None;
        self.spawn(Task::Return(ReturnRequest {
            equipment_instance_id,
            note: None,
        }));
    }

    pub(crate) fn on_returned(&mut self, result: Result<MutationAck, ClientError>) {
        match result {
            Ok(_) => {
                self.state.notifier.success("Equipamento devolvido com sucesso!");
                self.run_load_plan(View::Assign, View::Assign.load_plan());
            }
            Err(err) => {
                self.note_failure(&err);
                self.state
                    .notifier
                    .error(failure_message(&err, "Erro ao devolver equipamento"));
            }
        }
    }

    pub(crate) fn open_stock_form(&mut self) {
        self.state.stock_form = Some(StockForm::default());
        self.spawn(Task::Load {
            origin: View::Stock,
            load: Load::Collection(Collection::EquipmentTypes),
        });
    }

    pub(crate) fn submit_stock(&mut self) {
        let Some(form) = self.state.stock_form.as_ref() else {
            return;
        };
        match build_stock_request(form) {
            Ok(payload) => {
                tracing::info!(
                    equipment_type = payload.equipment_type_id,
                    quantity = payload.quantidade,
                    total = %payload.valor_total,
                    "create stock entry"
                );
                self.spawn(Task::CreateStock(payload));
            }
            Err(err) => self.state.notifier.error(err.to_string()),
        }
    }

    pub(crate) fn on_stock_created(&mut self, result: Result<StockEntry, ClientError>) {
        match result {
            Ok(entry) => {
                tracing::info!(id = entry.id, "stock entry created");
                self.state.notifier.success("Entrada adicionada com sucesso!");
                self.state.stock_form = None;
                self.run_load_plan(View::Stock, View::Stock.load_plan());
            }
            Err(err) => {
                self.note_failure(&err);
                self.state
                    .notifier
                    .error(failure_message(&err, "Erro ao adicionar entrada"));
            }
        }
    }

    pub(crate) fn submit_import(&mut self, kind: ImportKind) {
        match parse_import_path(&self.state.import.path) {
            Ok(path) => {
                tracing::info!(?kind, path = %path.display(), "import");
                self.state.import.kind = kind;
                self.state.import.result = None;
                self.spawn(Task::Import { kind, path });
            }
            Err(err) => self.state.notifier.error(err.to_string()),
        }
    }

    pub(crate) fn on_imported(
        &mut self,
        kind: ImportKind,
        result: Result<ImportSummary, ImportError>,
    ) {
        match result {
            Ok(summary) => {
                tracing::info!(?summary, "import finished");
                self.state.import.result = Some(summary);
                self.state.import.path.clear();
                self.state
                    .notifier
                    .success("Importação concluída com sucesso!");
            }
            Err(ImportError::Read(err)) => {
                tracing::warn!("import file unreadable: {err}");
                self.state
                    .notifier
                    .error(ImportError::Read(err).to_string());
            }
            Err(ImportError::Client(err)) => {
                self.note_failure(&err);
                let fallback = match kind {
                    ImportKind::Users => "Erro ao importar usuários",
                    ImportKind::Equipment => "Erro ao importar equipamentos",
                };
                self.state.notifier.error(failure_message(&err, fallback));
            }
        }
    }
}
