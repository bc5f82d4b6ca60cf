use serde::{Deserialize, Serialize};

use crate::domain::OrderRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Completed,
    Incomplete,
}

impl CompletionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CompletionStatus::Completed => "Completed",
            CompletionStatus::Incomplete => "Incomplete",
        }
    }
}

/// Order lines of one completion status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionPartition {
    pub value_lakh: f64,
    pub count: usize,
    pub orders: Vec<OrderRecord>,
}

/// Complete vs everything else
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub completed: CompletionPartition,
    pub incomplete: CompletionPartition,
}

impl CompletionSummary {
    pub fn partition(&self, status: CompletionStatus) -> &CompletionPartition {
        match status {
            CompletionStatus::Completed => &self.completed,
            CompletionStatus::Incomplete => &self.incomplete,
        }
    }

    pub fn total_count(&self) -> usize {
        self.completed.count + self.incomplete.count
    }

    /// Pie slices in display order: labels, values (lakh), counts
    pub fn pie(&self) -> CompletionPie {
        CompletionPie {
            labels: vec![
                CompletionStatus::Completed.label().to_string(),
                CompletionStatus::Incomplete.label().to_string(),
            ],
            values: vec![self.completed.value_lakh, self.incomplete.value_lakh],
            counts: vec![self.completed.count, self.incomplete.count],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionPie {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub counts: Vec<usize>,
}
