//! Row pattern counting.

use mcq_model::{QuestionTable, Row};

/// Count the rows of `table` for which `predicate` holds.
///
/// Every row is visited exactly once, in order.
pub fn count_matching<P>(table: &QuestionTable, mut predicate: P) -> usize
where
    P: FnMut(&Row) -> bool,
{
    table.iter().filter(|row| predicate(row)).count()
}
