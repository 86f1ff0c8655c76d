//! Requests run off the UI loop. Each task resolves to exactly one
//! [`Outcome`], delivered back through the app channel.

use std::path::PathBuf;

use api_types::{
    assignment::{AssignRequest, MutationAck, ReturnRequest},
    health::Health,
    import::{EquipmentImportStats, UserImportStats},
    reports::{Movement, StockSummary, UserReport, ValueSummaryRow},
    stock::{StockEntry, StockNew},
};
use thiserror::Error;

use crate::{
    app::view::{Load, View},
    client::{Client, ClientError, ImportFile},
    store::{self, Collection, Snapshot},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportKind {
    #[default]
    Users,
    Equipment,
}

impl ImportKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "Usuários",
            Self::Equipment => "Equipamentos",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSummary {
    Users(UserImportStats),
    Equipment(EquipmentImportStats),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Não foi possível ler o arquivo: {0}")]
    Read(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Reports offered by the reports view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    #[default]
    StockSummary,
    ValueSummary,
    Movements,
    User,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::StockSummary,
        ReportKind::ValueSummary,
        ReportKind::Movements,
        ReportKind::User,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::StockSummary => "Resumo do estoque",
            Self::ValueSummary => "Valor por tipo",
            Self::Movements => "Últimas movimentações",
            Self::User => "Equipamentos por usuário",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRequest {
    StockSummary,
    ValueSummary,
    Movements { limit: u32 },
    User { id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    StockSummary(StockSummary),
    ValueSummary(Vec<ValueSummaryRow>),
    Movements { limit: u32, rows: Vec<Movement> },
    User(UserReport),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Load { origin: View, load: Load },
    Health,
    Assign(AssignRequest),
    Return(ReturnRequest),
    CreateStock(StockNew),
    Import { kind: ImportKind, path: PathBuf },
    Report(ReportRequest),
    UserEquipment(i64),
}

#[derive(Debug)]
pub enum Outcome {
    Loaded {
        origin: View,
        key: Collection,
        result: Result<Snapshot, ClientError>,
    },
    Summary(Result<StockSummary, ClientError>),
    Health(Result<Health, ClientError>),
    Assigned(Result<MutationAck, ClientError>),
    Returned(Result<MutationAck, ClientError>),
    StockCreated(Result<StockEntry, ClientError>),
    Imported {
        kind: ImportKind,
        result: Result<ImportSummary, ImportError>,
    },
    Report(Result<Report, ClientError>),
    UserEquipment(Result<UserReport, ClientError>),
}

pub async fn execute(client: &Client, task: Task) -> Outcome {
    match task {
        Task::Load {
            origin,
            load: Load::StockSummary,
        } => {
            tracing::debug!(?origin, "loading stock summary");
            Outcome::Summary(client.stock_summary().await)
        }
        Task::Load {
            origin,
            load: Load::Collection(key),
        } => Outcome::Loaded {
            origin,
            key,
            result: store::fetch(client, key).await,
        },
        Task::Health => Outcome::Health(client.health().await),
        Task::Assign(payload) => Outcome::Assigned(client.assign(&payload).await),
        Task::Return(payload) => Outcome::Returned(client.return_equipment(&payload).await),
        Task::CreateStock(payload) => Outcome::StockCreated(client.stock_create(&payload).await),
        Task::Import { kind, path } => Outcome::Imported {
            kind,
            result: import(client, kind, path).await,
        },
        Task::Report(request) => Outcome::Report(report(client, request).await),
        Task::UserEquipment(user_id) => Outcome::UserEquipment(client.user_report(user_id).await),
    }
}

async fn import(
    client: &Client,
    kind: ImportKind,
    path: PathBuf,
) -> Result<ImportSummary, ImportError> {
    let bytes = tokio::fs::read(&path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let file = ImportFile { file_name, bytes };

    let summary = match kind {
        ImportKind::Users => ImportSummary::Users(client.import_users(file).await?.stats),
        ImportKind::Equipment => {
            ImportSummary::Equipment(client.import_equipment(file).await?.stats)
        }
    };
    Ok(summary)
}

async fn report(client: &Client, request: ReportRequest) -> Result<Report, ClientError> {
    let report = match request {
        ReportRequest::StockSummary => Report::StockSummary(client.stock_summary().await?),
        ReportRequest::ValueSummary => Report::ValueSummary(client.value_summary().await?),
        ReportRequest::Movements { limit } => Report::Movements {
            limit,
            rows: client.movements(Some(limit)).await?,
        },
        ReportRequest::User { id } => Report::User(client.user_report(id).await?),
    };
    Ok(report)
}
