use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::domain::BuyerRecord;

/// Buyer text fields addressable by a keyword clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseField {
    Offering,
    Sector,
    Customers,
    Keywords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClauseOperator {
    And,
    Or,
    Not,
}

/// One keyword condition: which field to probe, how to combine with the
/// accumulated result, and the raw search text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordClause {
    pub field: ClauseField,
    pub operator: ClauseOperator,
    pub text: String,
}

/// Ordered keyword clauses evaluated as a strict left-to-right fold. There
/// is no operator precedence: the accumulated result of the clauses so far
/// is combined with each clause in turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BooleanQuery {
    clauses: Vec<KeywordClause>,
}

impl BooleanQuery {
    pub fn new(clauses: Vec<KeywordClause>) -> Self {
        Self { clauses }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[KeywordClause] {
        &self.clauses
    }

    /// Evaluate the fold against one buyer. Clause text splits on whitespace
    /// into lowercased terms matched by substring against the lowercased
    /// field. Within a clause, AND requires every term, while OR and NOT hit
    /// on any term (NOT then negates). The first non-blank clause seeds the
    /// accumulator — its own operator is otherwise ignored, except that a
    /// leading NOT seeds with the negation. Blank clause text never
    /// constrains the result, and an empty query matches every buyer.
    pub fn matches(&self, buyer: &BuyerRecord) -> bool {
        let mut acc: Option<bool> = None;

        for clause in &self.clauses {
            let terms: Vec<String> = clause
                .text
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            if terms.is_empty() {
                continue;
            }

            let haystack = field_text(buyer, clause.field).to_lowercase();
            let hit = match clause.operator {
                ClauseOperator::And => terms.iter().all(|term| haystack.contains(term.as_str())),
                ClauseOperator::Or | ClauseOperator::Not => {
                    terms.iter().any(|term| haystack.contains(term.as_str()))
                }
            };

            acc = Some(match (acc, clause.operator) {
                (None, ClauseOperator::Not) => !hit,
                (None, _) => hit,
                (Some(prev), ClauseOperator::And) => prev && hit,
                (Some(prev), ClauseOperator::Or) => prev || hit,
                (Some(prev), ClauseOperator::Not) => prev && !hit,
            });
        }

        acc.unwrap_or(true)
    }
}

fn field_text(buyer: &BuyerRecord, field: ClauseField) -> Cow<'_, str> {
    match field {
        ClauseField::Offering => Cow::Borrowed(buyer.offering_text.as_str()),
        ClauseField::Sector => Cow::Borrowed(buyer.sector_text.as_str()),
        ClauseField::Customers => Cow::Borrowed(buyer.customer_text.as_str()),
        ClauseField::Keywords => Cow::Owned(buyer.keyword_tags.join(" ")),
    }
}
