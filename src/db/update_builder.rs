use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Builds `UPDATE <table> SET ... WHERE id = $n RETURNING *` from optional fields.
///
/// Only fields that carry a value become assignments, in the order they are
/// added. Every value is bound as a parameter; column names must be static.
pub struct PartialUpdate<'args> {
    builder: QueryBuilder<'args, Postgres>,
    assignments: usize,
}

impl<'args> PartialUpdate<'args> {
    pub fn new(table: &'static str) -> Self {
        Self {
            builder: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            assignments: 0,
        }
    }

    /// Adds `column = $n` when `value` is present.
    pub fn set<T>(&mut self, column: &'static str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if let Some(value) = value {
            self.push_column(column);
            self.builder.push_bind(value);
        }
        self
    }

    fn push_column(&mut self, column: &'static str) {
        if self.assignments > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column);
        self.builder.push(" = ");
        self.assignments += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.assignments == 0
    }

    /// Appends the `WHERE id = $n RETURNING *` tail.
    pub fn finish(mut self, id: i64) -> QueryBuilder<'args, Postgres> {
        self.builder.push(" WHERE id = ");
        self.builder.push_bind(id);
        self.builder.push(" RETURNING *");
        self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_present_assignments_in_order() {
        let mut update = PartialUpdate::new("courses");
        update
            .set("title", Some("Rust".to_string()))
            .set::<String>("description", None)
            .set("level", Some("beginner".to_string()));
        assert!(!update.is_empty());
        let builder = update.finish(9);
        assert_eq!(
            builder.sql(),
            "UPDATE courses SET title = $1, level = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn empty_update_is_detected() {
        let mut update = PartialUpdate::new("lessons");
        update.set::<i32>("lesson_order", None);
        assert!(update.is_empty());
    }
}
