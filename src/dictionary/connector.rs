//! Connection costs between adjacent parts of speech.

use std::path::Path;

use hashbrown::HashMap;
use log::warn;

use crate::constants::BOS_EOS_POS;
use crate::error::{HansegError, Result};
use crate::utils::parse_csv_row;

/// Interns POS names into dense ids. Id 0 is always `BOS/EOS`.
#[derive(Debug, Clone)]
pub(crate) struct PosTable {
    ids: HashMap<String, u16>,
    names: Vec<String>,
}

impl Default for PosTable {
    fn default() -> Self {
        let mut table = Self {
            ids: HashMap::new(),
            names: Vec::new(),
        };
        table.names.push(BOS_EOS_POS.to_string());
        table.ids.insert(BOS_EOS_POS.to_string(), 0);
        table
    }
}

impl PosTable {
    /// Returns `None` once the id space is exhausted.
    pub(crate) fn intern(&mut self, name: &str) -> Option<u16> {
        if let Some(&id) = self.ids.get(name) {
            return Some(id);
        }
        let id = u16::try_from(self.names.len()).ok()?;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Some(id)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<u16> {
        self.ids.get(name).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}

/// Sparse connection table with a fallback penalty.
#[derive(Debug, Clone)]
pub(crate) struct Connector {
    costs: HashMap<(u16, u16), i32>,
    default_cost: i32,
}

impl Connector {
    /// Parses `connection.csv` rows `left_pos,right_pos,cost`, interning every
    /// POS name into `pos_table`.
    pub(crate) fn from_csv(
        path: &Path,
        content: &str,
        pos_table: &mut PosTable,
        default_cost: i32,
    ) -> Result<Self> {
        if default_cost < 0 {
            return Err(HansegError::dictionary_load(
                path,
                format!("default connection cost must be >= 0, got {default_cost}"),
            ));
        }

        let mut costs = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let row_error = |message: String| {
                HansegError::dictionary_load(path, format!("line {line_no}: {message}"))
            };

            let fields = parse_csv_row(line).ok_or_else(|| row_error("field too long".into()))?;
            let [left, right, cost] = fields.as_slice() else {
                return Err(row_error(format!(
                    "expected 3 fields (left_pos,right_pos,cost), found {}",
                    fields.len()
                )));
            };
            if left.is_empty() || right.is_empty() {
                return Err(row_error("empty POS name".to_string()));
            }
            let cost: i32 = cost
                .trim()
                .parse()
                .map_err(|error| row_error(format!("invalid cost {cost:?}: {error}")))?;
            if cost < 0 {
                return Err(row_error(format!(
                    "negative cost {cost} for ({left}, {right})"
                )));
            }

            let too_many = || row_error("too many distinct POS names".to_string());
            let key = (
                pos_table.intern(left).ok_or_else(too_many)?,
                pos_table.intern(right).ok_or_else(too_many)?,
            );
            if costs.insert(key, cost).is_some() {
                warn!(
                    "{}: line {line_no}: duplicate pair ({left}, {right}) overrides earlier cost",
                    path.display()
                );
            }
        }

        Ok(Self {
            costs,
            default_cost,
        })
    }

    /// Cost of placing a morpheme whose left POS is `left_id` after one whose
    /// right POS is `right_id`.
    #[inline(always)]
    pub(crate) fn cost(&self, right_id: u16, left_id: u16) -> i32 {
        self.costs
            .get(&(right_id, left_id))
            .copied()
            .unwrap_or(self.default_cost)
    }

    pub(crate) fn default_cost(&self) -> i32 {
        self.default_cost
    }

    pub(crate) fn len(&self) -> usize {
        self.costs.len()
    }
}
