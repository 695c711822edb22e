mod association;
pub use association::Refine;
use association::Associations;

mod fields;
use fields::{Fields, Selection};
pub use fields::IntoFields;

mod filter;
pub use filter::Criteria;
use filter::Filter;

mod modifier;
use modifier::Modifier;
pub use modifier::IntoAmount;

mod output;
pub use output::Output;

mod restrictions;
use restrictions::Restrictions;

mod sort;
use sort::Sort;
pub use sort::SortSpec;

mod thrower;
use thrower::Thrower;

use crate::{
    grunt::{get_path, set_path},
    Grunt, Model, Result,
};

use arbiter_core::{
    driver::operation::Find,
    stmt::Select,
    Error,
};
use arbiter_soql::Serializer;

use async_recursion::async_recursion;
use futures_util::future::BoxFuture;
use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::{future::IntoFuture, sync::Arc};

/// A read against one model, built fluently and run with [`exec`](Query::exec)
/// or by awaiting it.
///
/// Builder calls never fail on their own. Problems such as unknown fields or
/// bad amounts are collected and reported together when the query runs,
/// before any remote call is made. Executing twice runs the query twice.
#[derive(Debug, Clone)]
pub struct Query {
    model: Model,
    fields: Fields,
    filter: Filter,
    modifier: Modifier,
    sort: Sort,
    associations: Associations,
    restrictions: Restrictions,
    thrower: Thrower,
    single_return: bool,

    /// Set while an association callback holds the query
    exec_disabled: bool,
}

/// Everything a query needs to run, resolved against the schema.
#[derive(Debug)]
struct Plan {
    select: Select,
    selection: Selection,
    restrictions: Arc<IndexSet<String>>,
}

impl Query {
    pub fn new(model: Model) -> Query {
        Query {
            model,
            fields: Fields::new(),
            filter: Filter::default(),
            modifier: Modifier::default(),
            sort: Sort::default(),
            associations: Associations::default(),
            restrictions: Restrictions::default(),
            thrower: Thrower::default(),
            single_return: false,
            exec_disabled: false,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Adds fields to select, by dotted local path. `*` selects every field
    /// of its node and naming a child selects the child's fields. `id` is
    /// always selected.
    pub fn select(mut self, fields: impl IntoFields) -> Self {
        self.fields.add(fields);
        self
    }

    pub fn fields(self, fields: impl IntoFields) -> Self {
        self.select(fields)
    }

    /// Adds filter conditions; see [`Criteria`].
    pub fn filter(mut self, criteria: impl Into<Criteria>) -> Self {
        self.filter.add(criteria);
        self
    }

    pub fn limit(mut self, amount: impl IntoAmount) -> Self {
        self.modifier.add_limit(amount);
        self
    }

    pub fn skip(mut self, amount: impl IntoAmount) -> Self {
        self.modifier.add_skip(amount);
        self
    }

    pub fn offset(self, amount: impl IntoAmount) -> Self {
        self.skip(amount)
    }

    /// Resolve to at most one record. Limits the query to one row unless a
    /// limit is set explicitly.
    pub fn first(mut self) -> Self {
        self.single_return = true;
        self
    }

    /// Replaces the sort; see [`SortSpec`].
    pub fn sort(mut self, spec: impl Into<SortSpec>) -> Self {
        self.sort.add(spec);
        self
    }

    /// Fetches a declared association alongside the results.
    ///
    /// `refine` receives the secondary query, already filtered to the parents'
    /// join keys, and may add fields, filters or further associations. It must
    /// not execute it.
    ///
    /// ```no_run
    /// # async fn example(db: arbiter::Db) -> arbiter::Result<()> {
    /// let cases = db
    ///     .model("Case")?
    ///     .query()
    ///     .with("comments", |comments| comments.select("*").sort("-createdDate"))
    ///     .exec()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with<F>(mut self, association: &str, refine: F) -> Self
    where
        F: Fn(Query) -> Query + Send + Sync + 'static,
    {
        match self.associations.add(&self.model, association, Arc::new(refine)) {
            Some(from) => self.select(from),
            None => self,
        }
    }

    /// Fail with a not-found error, naming the model, when nothing matches.
    pub fn throw_if_not_found(self) -> Self {
        let message = format!("{} not found", self.model.name());
        self.throw_if_not_found_with(message)
    }

    pub fn throw_if_not_found_with(mut self, message: impl Into<String>) -> Self {
        self.thrower.add(message);
        self
    }

    /// Records returned may only change the listed writable fields.
    pub fn allow_mutations(mut self, mutations: impl IntoFields) -> Self {
        self.restrictions.allow(self.model.schema(), mutations);
        self
    }

    /// Records returned may not change the listed writable fields.
    pub fn reject_mutations(mut self, mutations: impl IntoFields) -> Self {
        self.restrictions.reject(self.model.schema(), mutations);
        self
    }

    /// Renders the query without running it.
    pub fn to_soql(&self) -> Result<String> {
        let plan = self.plan()?;
        Ok(Serializer::new().serialize(&plan.select))
    }

    /// Logs the resolved query and returns its SOQL.
    pub fn explain(&self) -> Result<String> {
        let plan = self.plan()?;
        let soql = Serializer::new().serialize(&plan.select);

        tracing::info!(
            model = self.model.name(),
            fields = ?plan.selection.fields,
            associations = ?self.associations.names(),
            single_return = self.single_return,
            throw_if_not_found = self.thrower.is_set(),
            restrictions = ?plan.restrictions,
            soql = %soql,
            "arbiter.explain"
        );

        Ok(soql)
    }

    pub async fn execute(&self) -> Result<Output> {
        self.exec().await
    }

    /// Runs the query.
    ///
    /// Builder errors are returned together before anything is sent. Records
    /// are mapped back to local field names, with `null` for every selected
    /// field the remote row lacks, then associations are fetched and
    /// attached.
    #[async_recursion]
    pub async fn exec(&self) -> Result<Output> {
        if self.exec_disabled {
            return Err(Error::invalid_configuration(
                "do not execute a query passed to with(); it is run for you",
            ));
        }

        let plan = self.plan()?;
        let soql = Serializer::new().serialize(&plan.select);

        tracing::debug!(soql = %soql, object = %plan.select.source, "arbiter.query");

        let connection = self.model.connection().await?;
        let rows = connection
            .exec(
                Find {
                    select: plan.select,
                    soql,
                }
                .into(),
            )
            .await?
            .into_records()?;

        self.thrower.check(&rows)?;

        let mut grunts = rows
            .iter()
            .map(|row| self.grunt(row, &plan.selection, &plan.restrictions))
            .collect::<Vec<_>>();

        self.associations.fetch(&mut grunts).await?;

        Ok(if self.single_return {
            Output::One(grunts.into_iter().next())
        } else {
            Output::Many(grunts)
        })
    }

    fn plan(&self) -> Result<Plan> {
        let schema = self.model.schema();

        let selection = self.fields.build(schema);
        let filter = self.filter.build(schema);
        let order_by = self.sort.build(schema);
        let restrictions = self.restrictions.build();
        let associations = self.associations.build();
        let bounds = self.modifier.build();

        let mut errors = vec![];
        let selection = collect(selection, &mut errors);
        let filter = collect(filter, &mut errors);
        let order_by = collect(order_by, &mut errors);
        let restrictions = collect(restrictions, &mut errors);
        collect(associations, &mut errors);
        let bounds = collect(bounds, &mut errors);

        let (Some(selection), Some(filter), Some(order_by), Some(restrictions), Some(bounds)) =
            (selection, filter, order_by, restrictions, bounds)
        else {
            return Err(Error::aggregate(errors));
        };

        if !errors.is_empty() {
            return Err(Error::aggregate(errors));
        }

        let mut select = Select::new(schema.object(), selection.mappings.clone());
        select.filter = filter;
        select.order_by = order_by;
        select.limit = bounds.limit.or(self.single_return.then_some(1));
        select.offset = bounds.skip;

        Ok(Plan {
            select,
            selection,
            restrictions,
        })
    }

    /// Pours a raw row into a skeleton shaped by the selected local paths.
    fn grunt(
        &self,
        row: &Value,
        selection: &Selection,
        restrictions: &Arc<IndexSet<String>>,
    ) -> Grunt {
        let mut skeleton = Map::new();

        for (field, mapping) in selection.fields.iter().zip(&selection.mappings) {
            let value = match row {
                Value::Object(row) => get_path(row, mapping).cloned(),
                _ => None,
            };
            set_path(&mut skeleton, field, value.unwrap_or(Value::Null));
        }

        Grunt::new(self.model.clone(), skeleton, restrictions.clone())
    }
}

fn collect<T>(result: Result<T>, errors: &mut Vec<Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

impl IntoFuture for Query {
    type Output = Result<Output>;
    type IntoFuture = BoxFuture<'static, Result<Output>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.exec().await })
    }
}
