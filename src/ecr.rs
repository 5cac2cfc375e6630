//! Expert consensus rankings from FantasyPros export files
//!
//! Exports vary by year: the header row may be preceded by banner rows,
//! column names differ, player cells carry the team and position cells carry
//! the positional rank. Everything is normalized into `raw_ecr_rankings`,
//! which `link_rankings` then joins to `players` as `ecr_rankings`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::coerce::{coerce, is_missing};
use crate::error::{NflError, Result};
use crate::schema::{sql_type_for, typed_table_schema, SqlType, TableHints};
use crate::storage::{Database, RefreshScope, TableData};
use crate::value::Value;

pub const RAW_TABLE: &str = "raw_ecr_rankings";
pub const LINKED_TABLE: &str = "ecr_rankings";

const FILE_PREFIX: &str = "FantasyPros_";
const EXTENSIONS: [&str; 4] = ["csv", "tsv", "txt", "xls"];

/// Rows searched for the header row.
const HEADER_SEARCH_ROWS: usize = 10;

/// Columns of `raw_ecr_rankings`, in order.
pub const RAW_COLUMNS: [&str; 12] = [
    "year",
    "before_preseason",
    "player_name",
    "position",
    "rank",
    "best_rank",
    "worst_rank",
    "avg_rank",
    "stddev_rank",
    "adp",
    "vs_adp",
    "source_file",
];

const RAW_INDEXES: &[(&str, &[&str])] = &[("year", &["year", "before_preseason"])];
const LINKED_INDEXES: &[(&str, &[&str])] = &[("player", &["player_id"]), ("year", &["year", "before_preseason"])];

const NAME_SUFFIXES: [&str; 6] = ["jr", "sr", "ii", "iii", "iv", "v"];

/// Header spellings seen across export years.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("player name", "player_name"),
    ("overall (team)", "player_name"),
    ("player", "player_name"),
    ("player (team)", "player_name"),
    ("name", "player_name"),
    ("pos", "position"),
    ("rk", "rank"),
    ("best", "best_rank"),
    ("best rank", "best_rank"),
    ("worst", "worst_rank"),
    ("worst rank", "worst_rank"),
    ("avg.", "avg_rank"),
    ("avg", "avg_rank"),
    ("average", "avg_rank"),
    ("ave rank", "avg_rank"),
    ("std.dev", "stddev_rank"),
    ("std dev", "stddev_rank"),
    ("stddev", "stddev_rank"),
    ("standard deviation", "stddev_rank"),
    ("ecr vs. adp", "vs_adp"),
    ("vs. adp", "vs_adp"),
    ("vs adp", "vs_adp"),
    ("versus adp", "vs_adp"),
];

/// Year and pre-preseason flag parsed from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMeta {
    pub year: i64,
    pub before_preseason: bool,
}

impl FileMeta {
    /// First four-digit run in the name is the year.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        let year = bytes
            .windows(4)
            .enumerate()
            .find(|(i, w)| {
                w.iter().all(u8::is_ascii_digit)
                    && !bytes.get(i + 4).is_some_and(u8::is_ascii_digit)
                    && (*i == 0 || !bytes[i - 1].is_ascii_digit())
            })
            .and_then(|(i, _)| name[i..i + 4].parse().ok())?;

        Some(Self {
            year,
            before_preseason: name.to_ascii_lowercase().contains("prepreseason"),
        })
    }
}

/// One normalized ranking line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRow {
    pub year: i64,
    pub before_preseason: bool,
    pub player_name: String,
    pub position: Option<String>,
    pub rank: i64,
    pub best_rank: Option<i64>,
    pub worst_rank: Option<i64>,
    pub avg_rank: Option<f64>,
    pub stddev_rank: Option<f64>,
    pub adp: Option<f64>,
    pub vs_adp: Option<f64>,
    pub source_file: String,
}

impl RankingRow {
    fn into_values(self) -> Vec<Value> {
        let int = |v: Option<i64>| v.map(Value::Integer).unwrap_or(Value::Null);
        let real = |v: Option<f64>| v.map(Value::Real).unwrap_or(Value::Null);
        vec![
            Value::Integer(self.year),
            Value::Boolean(self.before_preseason),
            Value::Text(self.player_name),
            self.position.map(Value::Text).unwrap_or(Value::Null),
            Value::Integer(self.rank),
            int(self.best_rank),
            int(self.worst_rank),
            real(self.avg_rank),
            real(self.stddev_rank),
            real(self.adp),
            real(self.vs_adp),
            Value::Text(self.source_file),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct YearCoverage {
    pub year: i64,
    pub total_records: i64,
    pub before_preseason_records: i64,
    pub after_preseason_records: i64,
}

/// Completeness checks run after a raw rankings load.
#[derive(Debug, Clone, Serialize)]
pub struct EcrVerification {
    pub total_records: i64,
    pub year_coverage: Vec<YearCoverage>,
    pub missing_player_names: i64,
    pub missing_positions: i64,
    pub missing_ranks: i64,
    pub missing_avg_ranks: i64,
    pub min_year: Option<i64>,
    pub max_year: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EcrRefreshSummary {
    pub processed_files: usize,
    pub failed_files: usize,
    pub total_records: usize,
    pub verification: EcrVerification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub total: usize,
    pub matched: usize,
}

/// Ranking exports in `dir`, sorted by name.
pub fn find_ranking_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(NflError::NoRankingFiles {
            dir: dir.display().to_string(),
        });
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            let name_ok = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(FILE_PREFIX) && FileMeta::from_file_name(n).is_some());
            let ext_ok = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            name_ok && ext_ok
        })
        .collect();
    files.sort();
    Ok(files)
}

pub fn parse_ranking_file(path: &Path) -> Result<Vec<RankingRow>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let meta = FileMeta::from_file_name(&name).ok_or_else(|| NflError::SchemaConflict {
        table: RAW_TABLE.to_string(),
        message: format!("no year in file name {name}"),
    })?;

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    parse_rankings(&content, meta, &name)
}

/// Parse one export. Comma or tab delimited, chosen by which is more common
/// in the first lines.
pub fn parse_rankings(content: &str, meta: FileMeta, source_file: &str) -> Result<Vec<RankingRow>> {
    let head: String = content.lines().take(HEADER_SEARCH_ROWS).collect();
    let delimiter = if head.matches('\t').count() > head.matches(',').count() {
        b'\t'
    } else {
        b','
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let records: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.map(|r| r.iter().map(|c| c.trim().to_string()).collect()))
        .collect::<csv::Result<_>>()?;

    let header_idx = records
        .iter()
        .take(HEADER_SEARCH_ROWS)
        .position(|row| row.iter().any(|cell| canonical_header(cell) == "rank"))
        .unwrap_or(0);
    let Some(header) = records.get(header_idx) else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header.iter().map(|h| canonical_header(h)).collect();
    let col = |name: &str| headers.iter().position(|h| h == name);

    let (name_col, pos_col, rank_col) = (col("player_name"), col("position"), col("rank"));
    let (best_col, worst_col) = (col("best_rank"), col("worst_rank"));
    let (avg_col, stddev_col) = (col("avg_rank"), col("stddev_rank"));
    let (adp_col, vs_adp_col) = (col("adp"), col("vs_adp"));

    let mut rows = Vec::new();
    for (ordinal, record) in records[header_idx + 1..].iter().enumerate() {
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(String::as_str);
        let int = |idx: Option<usize>| cell(idx).and_then(|raw| coerce(raw, SqlType::Integer).into_value().as_i64());
        let real = |idx: Option<usize>| cell(idx).and_then(|raw| coerce(raw, SqlType::Real).into_value().as_f64());

        let player_name = cell(name_col).map(clean_player_name).unwrap_or_default();
        if player_name.is_empty() || player_name.eq_ignore_ascii_case("nan") {
            continue;
        }

        let rank = int(rank_col).unwrap_or(ordinal as i64 + 1);
        let vs_adp = real(vs_adp_col);
        let adp = match adp_col {
            Some(_) => real(adp_col),
            None => vs_adp.map(|vs| rank as f64 - vs),
        };

        rows.push(RankingRow {
            year: meta.year,
            before_preseason: meta.before_preseason,
            player_name,
            position: cell(pos_col).and_then(position_group),
            rank,
            best_rank: int(best_col),
            worst_rank: int(worst_col),
            avg_rank: real(avg_col),
            stddev_rank: real(stddev_col),
            adp,
            vs_adp,
            source_file: source_file.to_string(),
        });
    }

    debug!(file = source_file, rows = rows.len(), header_row = header_idx, "Parsed rankings");
    Ok(rows)
}

fn canonical_header(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    COLUMN_ALIASES
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| to.to_string())
        .unwrap_or(lower)
}

/// `"Christian McCaffrey (SF)"` and `"Christian McCaffrey SF"` become
/// `"Christian McCaffrey"`.
pub fn clean_player_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let is_team = |s: &str| {
        (2..=4).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_uppercase())
            && !NAME_SUFFIXES.contains(&s.to_ascii_lowercase().as_str())
    };

    if let Some(open) = trimmed.rfind('(') {
        if let Some(team) = trimmed[open + 1..].strip_suffix(')') {
            if is_team(team) {
                return trimmed[..open].trim().to_string();
            }
        }
    }
    if let Some((name, team)) = trimmed.rsplit_once(' ') {
        if is_team(team) && !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }
    trimmed.to_string()
}

/// `"WR12"` is `WR`; a bare position passes through.
pub fn position_group(raw: &str) -> Option<String> {
    let letters: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();
    (!letters.is_empty() && !is_missing(&letters)).then_some(letters)
}

/// Lowercased name without punctuation or generational suffixes.
pub fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '\''))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let mut parts: Vec<&str> = cleaned.split_whitespace().collect();
    while parts.len() > 1 && parts.last().is_some_and(|p| NAME_SUFFIXES.contains(p)) {
        parts.pop();
    }
    parts.join(" ")
}

fn columns_with_types(names: &[&str]) -> Vec<(String, SqlType)> {
    names.iter().map(|n| (n.to_string(), sql_type_for(n))).collect()
}

/// Replace `raw_ecr_rankings` with every export found in `dir`.
pub fn refresh_raw_ecr(db: &mut Database, dir: &Path) -> Result<EcrRefreshSummary> {
    let files = find_ranking_files(dir)?;
    if files.is_empty() {
        return Err(NflError::NoRankingFiles {
            dir: dir.display().to_string(),
        });
    }
    info!(files = files.len(), dir = %dir.display(), "Refreshing rankings");

    let mut processed_files = 0;
    let mut failed_files = 0;
    let mut rows = Vec::new();

    for path in &files {
        match parse_ranking_file(path) {
            Ok(parsed) if !parsed.is_empty() => {
                info!(file = %path.display(), rows = parsed.len(), "Processed rankings file");
                processed_files += 1;
                rows.extend(parsed.into_iter().map(RankingRow::into_values));
            }
            Ok(_) => {
                warn!(file = %path.display(), "No rankings found in file");
                failed_files += 1;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Could not read rankings file");
                failed_files += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(NflError::NoRankingFiles {
            dir: dir.display().to_string(),
        });
    }

    let schema = typed_table_schema(
        RAW_TABLE,
        &columns_with_types(&RAW_COLUMNS),
        Vec::new(),
        TableHints {
            natural_key: &[],
            indexes: RAW_INDEXES,
        },
    );
    let total_records = db.refresh(&TableData::new(schema, rows), RefreshScope::All)?;

    Ok(EcrRefreshSummary {
        processed_files,
        failed_files,
        total_records,
        verification: verify_rankings(db)?,
    })
}

pub fn verify_rankings(db: &Database) -> Result<EcrVerification> {
    if !db.table_exists(RAW_TABLE)? {
        return Err(NflError::MissingTable {
            table: RAW_TABLE.to_string(),
        });
    }

    let coverage = db.query(&format!(
        "SELECT year, COUNT(*),
                SUM(CASE WHEN before_preseason THEN 1 ELSE 0 END),
                SUM(CASE WHEN before_preseason THEN 0 ELSE 1 END)
         FROM {RAW_TABLE} GROUP BY year ORDER BY year"
    ))?;
    let year_coverage: Vec<YearCoverage> = coverage
        .rows
        .iter()
        .map(|row| YearCoverage {
            year: row[0].as_i64().unwrap_or_default(),
            total_records: row[1].as_i64().unwrap_or_default(),
            before_preseason_records: row[2].as_i64().unwrap_or_default(),
            after_preseason_records: row[3].as_i64().unwrap_or_default(),
        })
        .collect();

    let checks = db.query(&format!(
        "SELECT COUNT(*),
                SUM(CASE WHEN player_name IS NULL OR player_name = '' THEN 1 ELSE 0 END),
                SUM(CASE WHEN position IS NULL OR position = '' THEN 1 ELSE 0 END),
                SUM(CASE WHEN rank IS NULL THEN 1 ELSE 0 END),
                SUM(CASE WHEN avg_rank IS NULL THEN 1 ELSE 0 END),
                MIN(year), MAX(year)
         FROM {RAW_TABLE}"
    ))?;
    let row = checks.rows.first().cloned().unwrap_or_default();
    let get = |i: usize| row.get(i).and_then(Value::as_i64);

    Ok(EcrVerification {
        total_records: get(0).unwrap_or_default(),
        year_coverage,
        missing_player_names: get(1).unwrap_or_default(),
        missing_positions: get(2).unwrap_or_default(),
        missing_ranks: get(3).unwrap_or_default(),
        missing_avg_ranks: get(4).unwrap_or_default(),
        min_year: get(5),
        max_year: get(6),
    })
}

/// Build `ecr_rankings`: raw rankings plus the matched `player_id` and the
/// rank within position for each ranking list.
pub fn link_rankings(db: &mut Database) -> Result<LinkSummary> {
    for table in [RAW_TABLE, "players"] {
        if !db.table_exists(table)? {
            return Err(NflError::MissingTable {
                table: table.to_string(),
            });
        }
    }

    let lookup = player_lookup(db)?;

    let raw = db.query(&format!(
        "SELECT {} FROM {RAW_TABLE} ORDER BY year, before_preseason, rank",
        RAW_COLUMNS.join(", ")
    ))?;

    let name_idx = 2;
    let position_idx = 3;
    let mut position_counters: HashMap<(Option<i64>, String, String), i64> = HashMap::new();
    let mut matched = 0;

    let rows: Vec<Vec<Value>> = raw
        .rows
        .into_iter()
        .map(|mut row| {
            let name = normalize_name(row[name_idx].as_str().unwrap_or_default());
            let position = row[position_idx].as_str().unwrap_or_default().to_string();

            let player_id = lookup.resolve(&name, &position);
            if player_id.is_some() {
                matched += 1;
            }

            let list = (row[0].as_i64(), row[1].to_string(), position);
            let counter = position_counters.entry(list).or_insert(0);
            *counter += 1;
            let position_rank = if row[position_idx].is_null() {
                Value::Null
            } else {
                Value::Integer(*counter)
            };

            row.push(player_id.map(Value::Text).unwrap_or(Value::Null));
            row.push(position_rank);
            row
        })
        .collect();

    let mut names: Vec<&str> = RAW_COLUMNS.to_vec();
    names.extend(["player_id", "position_rank"]);
    let schema = typed_table_schema(
        LINKED_TABLE,
        &columns_with_types(&names),
        Vec::new(),
        TableHints {
            natural_key: &[],
            indexes: LINKED_INDEXES,
        },
    );

    let total = db.refresh(&TableData::new(schema, rows), RefreshScope::All)?;
    if matched < total {
        warn!(unmatched = total - matched, "Rankings without a matching player");
    }
    info!(total, matched, "Linked rankings to players");

    Ok(LinkSummary { total, matched })
}

/// Player ids keyed by normalized name and position, with a name-only
/// fallback for names that belong to exactly one player.
struct PlayerLookup {
    by_name_position: HashMap<(String, String), String>,
    by_name: BTreeMap<String, Option<String>>,
}

impl PlayerLookup {
    fn resolve(&self, name: &str, position: &str) -> Option<String> {
        self.by_name_position
            .get(&(name.to_string(), position.to_string()))
            .or_else(|| self.by_name.get(name).and_then(Option::as_ref))
            .cloned()
    }
}

fn player_lookup(db: &Database) -> Result<PlayerLookup> {
    let columns = db.table_info("players")?;
    let pick = |candidates: &[&'static str]| {
        candidates
            .iter()
            .find(|c| columns.iter().any(|col| col.name == **c))
            .copied()
    };
    let (Some(id), Some(name)) = (
        pick(&["gsis_id", "player_id"]),
        pick(&["display_name", "player_name", "full_name"]),
    ) else {
        return Err(NflError::SchemaConflict {
            table: "players".to_string(),
            message: "no player id or name column".to_string(),
        });
    };
    let position = pick(&["position"]).unwrap_or("NULL");

    let players = db.query(&format!("SELECT {id}, {name}, {position} FROM players"))?;

    let mut lookup = PlayerLookup {
        by_name_position: HashMap::new(),
        by_name: BTreeMap::new(),
    };
    for row in players.rows {
        let (Some(player_id), Some(player_name)) = (row[0].as_str(), row[1].as_str()) else {
            continue;
        };
        let key = normalize_name(player_name);
        let position = row[2].as_str().unwrap_or_default().to_ascii_uppercase();

        lookup
            .by_name_position
            .entry((key.clone(), position))
            .or_insert_with(|| player_id.to_string());
        lookup
            .by_name
            .entry(key)
            .and_modify(|existing| {
                if existing.as_deref() != Some(player_id) {
                    *existing = None;
                }
            })
            .or_insert_with(|| Some(player_id.to_string()));
    }

    Ok(lookup)
}
