use serde_json::Value;

/// A selected column, or an embedded related resource
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// `*`
    All,
    Field(String),
    Embed(Embed),
}

/// How an embedded resource relates to the row it is embedded in
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    /// The parent row holds `fk_column`, pointing at the embedded table's `id`
    ToOne { fk_column: String },
    /// Rows of the embedded table hold `fk_column`, pointing at the parent's `id`
    ToMany { fk_column: String },
}

/// Embedded resource in a select list, e.g. `asn:asn_id(name)` or `asn(id)`
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub alias: String,
    pub table: String,
    pub relation: Relation,
    pub columns: Vec<Column>,
}

impl Embed {
    /// Embed the single row of `table` referenced by the parent's `fk_column`
    pub fn to_one(alias: &str, table: &str, fk_column: &str) -> Self {
        Self {
            alias: alias.to_string(),
            table: table.to_string(),
            relation: Relation::ToOne {
                fk_column: fk_column.to_string(),
            },
            columns: Vec::new(),
        }
    }

    /// Embed every row of `table` whose `fk_column` references the parent
    pub fn to_many(table: &str, fk_column: &str) -> Self {
        Self {
            alias: table.to_string(),
            table: table.to_string(),
            relation: Relation::ToMany {
                fk_column: fk_column.to_string(),
            },
            columns: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str) -> Self {
        self.columns.push(Column::Field(name.to_string()));
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.columns.push(Column::Embed(embed));
        self
    }

    fn render(&self) -> String {
        let columns = render_columns(&self.columns);
        match &self.relation {
            Relation::ToOne { fk_column } => format!("{}:{}({})", self.alias, fk_column, columns),
            Relation::ToMany { .. } => format!("{}({})", self.table, columns),
        }
    }
}

fn render_columns(columns: &[Column]) -> String {
    if columns.is_empty() {
        return "*".to_string();
    }

    columns
        .iter()
        .map(|c| match c {
            Column::All => "*".to_string(),
            Column::Field(name) => name.clone(),
            Column::Embed(embed) => embed.render(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Row filter, rendered as a PostgREST horizontal filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
    IsNull(String),
    NotNull(String),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _) | Filter::Neq(c, _) | Filter::In(c, _) => c,
            Filter::IsNull(c) | Filter::NotNull(c) => c,
        }
    }

    /// `(column, operator.value)` query pair
    pub fn to_param(&self) -> (String, String) {
        let value = match self {
            Filter::Eq(_, v) => format!("eq.{}", literal(v)),
            Filter::Neq(_, v) => format!("neq.{}", literal(v)),
            Filter::IsNull(_) => "is.null".to_string(),
            Filter::NotNull(_) => "not.is.null".to_string(),
            Filter::In(_, values) => format!(
                "in.({})",
                values
                    .iter()
                    .map(quoted_literal)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        };
        (self.column().to_string(), value)
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// Values inside `in.(...)` must be quoted when they contain reserved characters
fn quoted_literal(value: &Value) -> String {
    let raw = literal(value);
    if raw.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", raw.replace('"', "\\\""))
    } else {
        raw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Read request against one collection: columns, filters, ordering and limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    columns: Vec<Column>,
    filters: Vec<Filter>,
    order: Vec<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_all(mut self) -> Self {
        self.columns.push(Column::All);
        self
    }

    pub fn field(mut self, name: &str) -> Self {
        self.columns.push(Column::Field(name.to_string()));
        self
    }

    pub fn fields(mut self, names: &[&str]) -> Self {
        self.columns
            .extend(names.iter().map(|n| Column::Field(n.to_string())));
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.columns.push(Column::Embed(embed));
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(Filter::Eq(column.to_string(), value.into()))
    }

    pub fn neq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(Filter::Neq(column.to_string(), value.into()))
    }

    pub fn is_null(self, column: &str) -> Self {
        self.filter(Filter::IsNull(column.to_string()))
    }

    pub fn not_null(self, column: &str) -> Self {
        self.filter(Filter::NotNull(column.to_string()))
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending: true,
        });
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending: false,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn orders(&self) -> &[Order] {
        &self.order
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.limit
    }

    /// Value of the PostgREST `select` parameter
    pub fn select_param(&self) -> String {
        render_columns(&self.columns)
    }

    /// Full PostgREST query string pairs for this read
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_param())];
        params.extend(self.filters.iter().map(Filter::to_param));

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| {
                    format!(
                        "{}.{}",
                        o.column,
                        if o.ascending { "asc" } else { "desc" }
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_param_with_to_one_embed() {
        let query = Query::new()
            .select_all()
            .embed(Embed::to_one("asn", "asn", "asn_id").field("name"));

        assert_eq!(query.select_param(), "*,asn:asn_id(name)");
    }

    #[test]
    fn test_select_param_with_nested_embed() {
        let query = Query::new().field("wheel_count").embed(
            Embed::to_one("asn", "asn", "asn_id").embed(
                Embed::to_one("instansi", "instansi", "instansi_id")
                    .field("id")
                    .field("name"),
            ),
        );

        assert_eq!(
            query.select_param(),
            "wheel_count,asn:asn_id(instansi:instansi_id(id,name))"
        );
    }

    #[test]
    fn test_select_param_with_to_many_embed() {
        let query = Query::new()
            .fields(&["id", "name"])
            .embed(Embed::to_many("asn", "instansi_id").field("id"));

        assert_eq!(query.select_param(), "id,name,asn(id)");
    }

    #[test]
    fn test_empty_select_means_all_columns() {
        assert_eq!(Query::new().select_param(), "*");
    }

    #[test]
    fn test_filter_params() {
        assert_eq!(
            Filter::Eq("asn_id".into(), json!("abc")).to_param(),
            ("asn_id".to_string(), "eq.abc".to_string())
        );
        assert_eq!(
            Filter::IsNull("asn_id".into()).to_param(),
            ("asn_id".to_string(), "is.null".to_string())
        );
        assert_eq!(
            Filter::NotNull("asn_id".into()).to_param(),
            ("asn_id".to_string(), "not.is.null".to_string())
        );
        assert_eq!(
            Filter::In("nopol".into(), vec![json!("B 1"), json!("B2")]).to_param(),
            ("nopol".to_string(), "in.(\"B 1\",B2)".to_string())
        );
    }

    #[test]
    fn test_full_params_order_and_limit() {
        let params = Query::new()
            .select_all()
            .neq("id", "x")
            .order_desc("created_at")
            .order_asc("name")
            .limit(1)
            .to_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("id".to_string(), "neq.x".to_string()),
                ("order".to_string(), "created_at.desc,name.asc".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
    }
}
