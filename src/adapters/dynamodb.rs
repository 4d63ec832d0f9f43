use crate::domain::model::Entity;
use crate::domain::ports::Repository;
use crate::utils::error::{StoreError, StoreResult};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;
use std::marker::PhantomData;

const KEY_ATTRIBUTE: &str = "id";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB table whose partition key is the string attribute `id`.
///
/// Entities map to flat items through serde; timestamps are stored as
/// RFC 3339 strings.
#[derive(Debug, Clone)]
pub struct DynamoRepository<E: Entity> {
    client: Client,
    table: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DynamoRepository<E> {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
            _entity: PhantomData,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    fn marshal(entity: &E) -> StoreResult<Item> {
        to_item(entity).map_err(|e| {
            StoreError::conversion(format!("failed to marshal {} item: {}", E::KIND, e))
        })
    }

    fn unmarshal(item: Item) -> StoreResult<E> {
        from_item(item).map_err(|e| {
            StoreError::conversion(format!("failed to unmarshal {} item: {}", E::KIND, e))
        })
    }
}

fn sdk_failure<Err>(action: &str, err: Err) -> StoreError
where
    Err: std::error::Error,
{
    StoreError::backend(format!("{}: {}", action, DisplayErrorContext(err)))
}

fn key_value(id: &str) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

/// `SET #f0 = :v0, ... REMOVE #f3, ...` with its placeholder maps.
#[derive(Debug)]
struct UpdateExpression {
    expression: String,
    names: HashMap<String, String>,
    values: Item,
}

impl UpdateExpression {
    /// `item` must be non-empty and must not contain the key attribute.
    fn build(item: Item, optional: &[&str]) -> Self {
        let removed: Vec<&str> = optional
            .iter()
            .copied()
            .filter(|name| !item.contains_key(*name))
            .collect();

        let mut names = HashMap::with_capacity(item.len() + removed.len());
        let mut values = Item::with_capacity(item.len());
        let mut assignments = Vec::with_capacity(item.len());

        // sorted so the expression is stable between calls
        let mut attributes: Vec<_> = item.into_iter().collect();
        attributes.sort_by(|a, b| a.0.cmp(&b.0));

        for (i, (name, value)) in attributes.into_iter().enumerate() {
            let name_ref = format!("#f{}", i);
            let value_ref = format!(":v{}", i);
            assignments.push(format!("{} = {}", name_ref, value_ref));
            names.insert(name_ref, name);
            values.insert(value_ref, value);
        }

        let mut expression = format!("SET {}", assignments.join(", "));
        if !removed.is_empty() {
            let offset = assignments.len();
            let refs: Vec<String> = removed
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    let name_ref = format!("#f{}", offset + i);
                    names.insert(name_ref.clone(), name.to_string());
                    name_ref
                })
                .collect();
            expression.push_str(&format!(" REMOVE {}", refs.join(", ")));
        }

        Self {
            expression,
            names,
            values,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for DynamoRepository<E> {
    #[tracing::instrument(skip(self, entity), fields(table = %self.table))]
    async fn save(&self, entity: &E) -> StoreResult<()> {
        let item = Self::marshal(entity)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| sdk_failure("failed to put item in DynamoDB", e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = %self.table))]
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<E>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(KEY_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(|e| sdk_failure("failed to get item from DynamoDB", e))?;

        output.item.map(Self::unmarshal).transpose()
    }

    /// Follows `LastEvaluatedKey` until the whole table has been scanned.
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    async fn find_all(&self) -> StoreResult<Vec<E>> {
        let mut records = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| sdk_failure("failed to scan DynamoDB table", e))?;

            for item in output.items.unwrap_or_default() {
                records.push(Self::unmarshal(item)?);
            }

            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        tracing::debug!(count = records.len(), "scan complete");
        Ok(records)
    }

    /// Overwrites every non-key attribute with a single `SET` expression and
    /// removes optional attributes the merged entity no longer carries.
    #[tracing::instrument(skip(self, entity), fields(table = %self.table))]
    async fn update(&self, entity: &E) -> StoreResult<()> {
        let mut item = Self::marshal(entity)?;
        item.remove(KEY_ATTRIBUTE);
        if item.is_empty() {
            return self.save(entity).await;
        }

        let expression = UpdateExpression::build(item, E::OMITTED_WHEN_EMPTY);

        self.client
            .update_item()
            .table_name(&self.table)
            .key(KEY_ATTRIBUTE, key_value(entity.id()))
            .update_expression(expression.expression)
            .set_expression_attribute_names(Some(expression.names))
            .set_expression_attribute_values(Some(expression.values))
            .send()
            .await
            .map_err(|e| sdk_failure("failed to update item in DynamoDB", e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(table = %self.table))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(KEY_ATTRIBUTE, key_value(id))
            .send()
            .await
            .map_err(|e| sdk_failure("failed to delete item from DynamoDB", e))?;

        Ok(())
    }
}
