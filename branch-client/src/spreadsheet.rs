//! Spreadsheet bridge
//!
//! 表格文件 <-> JSON 记录转换:
//! - 导入: 读取首个工作表，以表头行作为键，每行生成一个 JSON 对象
//! - 导出: 当前页网点写入 `Branches` 工作表

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use shared::Branch;

use crate::{ClientError, ClientResult};

/// 导出工作表名
pub const EXPORT_SHEET_NAME: &str = "Branches";

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE: &str = "branches.xlsx";

/// 导出列 (JSON 字段名)
pub const EXPORT_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "code",
    "address",
    "city",
    "state",
    "phone",
    "email",
    "status",
    "createdAt",
    "updatedAt",
];

/// One spreadsheet row keyed by header
pub type Row = Map<String, Value>;

/// Read the first sheet of a workbook file (`.xlsx` / `.xls` / `.xlsb` / `.ods`)
pub fn read_rows(path: impl AsRef<Path>) -> ClientResult<Vec<Row>> {
    let bytes = std::fs::read(path.as_ref())?;
    rows_from_bytes(bytes)
}

/// Parse workbook bytes held in memory
pub fn rows_from_bytes(bytes: Vec<u8>) -> ClientResult<Vec<Row>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ClientError::Spreadsheet("Workbook has no sheets".to_string()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let keys: Vec<Option<String>> = header.iter().map(cell_text).collect();

    let records = rows
        .map(|cells| {
            keys.iter()
                .zip(cells)
                .filter_map(|(key, cell)| {
                    let key = key.as_ref()?;
                    let value = cell_text(cell)?;
                    Some((key.clone(), Value::String(value)))
                })
                .collect::<Row>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    Ok(records)
}

/// Cell as text; empty cells and blank strings yield `None`
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Write branches to a workbook with one `Branches` sheet
///
/// 表头为 JSON 字段名，值为原始存储值；缺省的可选字段留空。
pub fn export_branches(path: impl AsRef<Path>, branches: &[Branch]) -> ClientResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (index, branch) in branches.iter().enumerate() {
        let row = index as u32 + 1;
        let Value::Object(fields) = serde_json::to_value(branch)? else {
            return Err(ClientError::Internal(
                "Branch did not serialize to an object".to_string(),
            ));
        };
        for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
            match fields.get(*name) {
                Some(Value::String(text)) => {
                    worksheet.write_string(row, col as u16, text)?;
                }
                Some(Value::Null) | None => {}
                Some(other) => {
                    worksheet.write_string(row, col as u16, other.to_string())?;
                }
            }
        }
    }

    workbook.save(path.as_ref())?;
    tracing::info!(
        path = %path.as_ref().display(),
        rows = branches.len(),
        "Branches exported"
    );
    Ok(())
}
