use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;

use crate::{
    errors::{BankError, Result},
    ledger::transaction::{parse_decimal, LineError},
};

const FIELD_COUNT: usize = 6;
const TMP_SUFFIX: &str = "tmp";

/// One persisted customer: `First\tLast\tEmail\tAccountNumber\tSavings\tCurrent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_number: String,
    pub savings_balance: Decimal,
    pub current_balance: Decimal,
}

impl RosterRecord {
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{:.2}\t{:.2}",
            self.first_name,
            self.last_name,
            self.email,
            self.account_number,
            self.savings_balance,
            self.current_balance
        )
    }

    pub fn parse_line(line: &str) -> std::result::Result<Self, LineError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != FIELD_COUNT {
            return Err(LineError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }
        Ok(Self {
            first_name: fields[0].to_string(),
            last_name: fields[1].to_string(),
            email: fields[2].to_string(),
            account_number: fields[3].to_string(),
            savings_balance: parse_decimal(fields[4])?,
            current_balance: parse_decimal(fields[5])?,
        })
    }
}

/// Whole-file roster persistence. Unlike account files, a single bad line fails the load.
#[derive(Debug, Clone)]
pub struct RosterFile {
    path: PathBuf,
}

impl RosterFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns each record with its 1-based line number.
    pub fn load(&self) -> Result<Vec<(usize, RosterRecord)>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(BankError::persistence("read roster", &self.path, err)),
        };

        let mut records = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = RosterRecord::parse_line(line).map_err(|err| BankError::MalformedRoster {
                line: idx + 1,
                reason: err.to_string(),
            })?;
            records.push((idx + 1, record));
        }
        Ok(records)
    }

    /// Rewrites the roster by staging to a temporary file and renaming it into place.
    pub fn save(&self, records: &[RosterRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| BankError::persistence("create directory", parent, err))?;
        }
        let mut contents = String::new();
        for record in records {
            contents.push_str(&record.to_line());
            contents.push('\n');
        }
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &contents)
            .map_err(|err| BankError::persistence("write roster", &tmp, err))?;
        fs::rename(&tmp, &self.path)
            .map_err(|err| BankError::persistence("replace roster", &self.path, err))?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}
