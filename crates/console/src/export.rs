//! CSV export of the filtered stock and users tables.

use std::path::{Path, PathBuf};

use api_types::{Money, stock::StockEntry, user::User};
use chrono::NaiveDateTime;
use csv::Writer;
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    format,
};

#[derive(Serialize)]
struct StockRow<'a> {
    id: i64,
    tipo: &'a str,
    marca: &'a str,
    modelo: &'a str,
    nota_numero: &'a str,
    nota_data: String,
    quantidade: i64,
    valor_unitario: String,
    valor_total: String,
    origem: &'a str,
}

#[derive(Serialize)]
struct UserRow<'a> {
    id: i64,
    nome: &'a str,
    cpf: &'a str,
    matricula: &'a str,
    cargo: &'a str,
    setor: &'a str,
    cidade: &'a str,
    email: &'a str,
}

/// `{view}_{YYYYmmdd_HHMMSS}.csv`
pub fn file_name(view: &str, now: NaiveDateTime) -> String {
    format!("{view}_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn decimal(value: Money) -> String {
    format!("{:.2}", value.as_major())
}

pub fn stock_csv(rows: &[&StockEntry]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(vec![]);
    for entry in rows {
        writer.serialize(StockRow {
            id: entry.id,
            tipo: format::stock_type_name(entry),
            marca: format::stock_brand(entry),
            modelo: format::stock_model(entry),
            nota_numero: format::or_dash(entry.nota_numero.as_deref()),
            nota_data: format::date(entry.nota_data),
            quantidade: entry.quantidade,
            valor_unitario: decimal(entry.valor_unitario),
            valor_total: decimal(entry.valor_total),
            origem: format::or_dash(entry.origem.as_deref()),
        })?;
    }
    finish(writer)
}

pub fn users_csv(rows: &[&User]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(vec![]);
    for user in rows {
        writer.serialize(UserRow {
            id: user.id,
            nome: &user.nome,
            cpf: format::or_dash(user.cpf.as_deref()),
            matricula: format::or_dash(user.matricula.as_deref()),
            cargo: format::or_dash(user.cargo.as_deref()),
            setor: format::or_dash(user.setor.as_deref()),
            cidade: format::or_dash(user.cidade.as_deref()),
            email: format::or_dash(user.email.as_deref()),
        })?;
    }
    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|err| AppError::Io(err.into_error()))
}

pub fn write_stock(dir: &Path, now: NaiveDateTime, rows: &[&StockEntry]) -> Result<PathBuf> {
    write(dir, &file_name("estoque", now), &stock_csv(rows)?)
}

pub fn write_users(dir: &Path, now: NaiveDateTime, rows: &[&User]) -> Result<PathBuf> {
    write(dir, &file_name("usuarios", now), &users_csv(rows)?)
}

fn write(dir: &Path, name: &str, data: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, data)?;
    Ok(path)
}
