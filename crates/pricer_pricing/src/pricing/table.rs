//! Option × method result tables.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::mc::SimulationMethod;
use crate::path_dependent::OptionType;

use super::PriceEstimate;

const OPTION_HEADER: &str = "Option type";

/// Price estimates with options as rows and methods as columns.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::SimulationMethod;
/// use pricer_pricing::path_dependent::OptionType;
/// use pricer_pricing::pricing::{PriceEstimate, ResultTable};
///
/// let mut table = ResultTable::new();
/// let estimate = PriceEstimate::from_samples(&[1.0, 3.0]).unwrap();
/// table.insert(OptionType::Vanilla, SimulationMethod::Naive, estimate);
///
/// assert_eq!(table.get(OptionType::Vanilla, SimulationMethod::Naive), Some(&estimate));
/// assert!(table.to_string().contains("Vanilla"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    cells: BTreeMap<(OptionType, SimulationMethod), PriceEstimate>,
}

impl ResultTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell for `option` and `method`.
    pub fn insert(&mut self, option: OptionType, method: SimulationMethod, estimate: PriceEstimate) {
        self.cells.insert((option, method), estimate);
    }

    /// Estimate for `option` and `method`.
    pub fn get(&self, option: OptionType, method: SimulationMethod) -> Option<&PriceEstimate> {
        self.cells.get(&(option, method))
    }

    /// Number of filled cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if no cell is filled.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Options with at least one cell, in table order.
    pub fn options(&self) -> Vec<OptionType> {
        let set: BTreeSet<OptionType> = self.cells.keys().map(|(option, _)| *option).collect();
        set.into_iter().collect()
    }

    /// Methods with at least one cell, in column order.
    pub fn methods(&self) -> Vec<SimulationMethod> {
        let set: BTreeSet<SimulationMethod> =
            self.cells.keys().map(|(_, method)| *method).collect();
        set.into_iter().collect()
    }

    /// Every filled cell, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (OptionType, SimulationMethod, &PriceEstimate)> {
        self.cells
            .iter()
            .map(|((option, method), estimate)| (*option, *method, estimate))
    }

    /// Header row followed by one row per option, cells rendered by `render`.
    ///
    /// Missing cells are empty strings.
    pub fn rows<F>(&self, render: F) -> Vec<Vec<String>>
    where
        F: Fn(&PriceEstimate) -> String,
    {
        let methods = self.methods();
        let mut header = vec![OPTION_HEADER.to_string()];
        header.extend(methods.iter().map(|m| m.label().to_string()));

        let mut rows = vec![header];
        for option in self.options() {
            let mut row = vec![option.label().to_string()];
            row.extend(
                methods
                    .iter()
                    .map(|&method| self.get(option, method).map(&render).unwrap_or_default()),
            );
            rows.push(row);
        }
        rows
    }

    /// Rows of point estimates, rounded to two decimals.
    pub fn price_rows(&self) -> Vec<Vec<String>> {
        self.rows(|estimate| format!("{:.2}", estimate.mean))
    }

    /// Rows of `[lower, upper]` interval strings.
    pub fn interval_rows(&self) -> Vec<Vec<String>> {
        self.rows(|estimate| estimate.interval.to_string())
    }

    /// Aligned text rendering of the interval table.
    pub fn interval_table(&self) -> String {
        render_aligned(&self.interval_rows())
    }
}

/// Aligned text rendering of the price table.
impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_aligned(&self.price_rows()))
    }
}

fn render_aligned(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                if c == 0 {
                    format!("{:<width$}", cell, width = widths[c])
                } else {
                    format!("{:>width$}", cell, width = widths[c])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
