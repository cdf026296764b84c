//! 内存持久化上下文

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tally_domain_core::{Entity, EntityId};
use tally_errors::{AppError, AppResult};
use tally_ports::EntityStore;
use tokio::sync::RwLock;
use uuid::Uuid;

type Table = BTreeMap<Uuid, Value>;

/// 内存持久化上下文
///
/// 每种实体按 `Entity::NAME` 分表，行以 JSON 形式保存，
/// 读取时反序列化，调用方拿到的永远是副本。
#[derive(Debug, Default)]
pub struct InMemoryContext {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl InMemoryContext {
    pub fn new() -> Self {
        Self::default()
    }
}

fn identity<T: Entity>(entity: &T) -> AppResult<Uuid> {
    entity
        .id()
        .map(EntityId::as_uuid)
        .ok_or_else(|| AppError::validation(format!("{} must have an identity", T::NAME)))
}

fn encode<T: Entity + Serialize>(entity: &T) -> AppResult<Value> {
    serde_json::to_value(entity)
        .map_err(|e| AppError::persistence(format!("Failed to encode {}: {}", T::NAME, e)))
}

fn decode<T: Entity + DeserializeOwned>(value: &Value) -> AppResult<T> {
    T::deserialize(value)
        .map_err(|e| AppError::persistence(format!("Failed to decode {}: {}", T::NAME, e)))
}

#[async_trait]
impl<T> EntityStore<T> for InMemoryContext
where
    T: Entity + Serialize + DeserializeOwned,
{
    async fn insert(&self, entity: &T) -> AppResult<()> {
        let id = identity(entity)?;
        let row = encode(entity)?;

        let mut tables = self.tables.write().await;
        let table = tables.entry(T::NAME).or_default();
        if table.contains_key(&id) {
            return Err(AppError::persistence(format!(
                "Duplicate key: {} {} already exists",
                T::NAME,
                id
            )));
        }
        table.insert(id, row);
        Ok(())
    }

    async fn fetch(&self, id: &T::Id) -> AppResult<Option<T>> {
        let tables = self.tables.read().await;
        tables
            .get(T::NAME)
            .and_then(|table| table.get(&id.as_uuid()))
            .map(decode)
            .transpose()
    }

    async fn fetch_all(&self) -> AppResult<Vec<T>> {
        let tables = self.tables.read().await;
        match tables.get(T::NAME) {
            Some(table) => table.values().map(decode).collect(),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_page(&self, limit: u32, offset: u64) -> AppResult<Vec<T>> {
        let tables = self.tables.read().await;
        match tables.get(T::NAME) {
            Some(table) => table
                .values()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(limit as usize)
                .map(decode)
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.get(T::NAME).map_or(0, |table| table.len() as u64))
    }

    async fn replace(&self, entity: &T) -> AppResult<bool> {
        let id = identity(entity)?;
        let row = encode(entity)?;

        let mut tables = self.tables.write().await;
        match tables.get_mut(T::NAME).and_then(|table| table.get_mut(&id)) {
            Some(slot) => {
                *slot = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &T::Id) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .get_mut(T::NAME)
            .is_some_and(|table| table.remove(&id.as_uuid()).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fmt;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct TagId(Uuid);

    impl fmt::Display for TagId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl EntityId for TagId {
        fn generate() -> Self {
            Self(Uuid::now_v7())
        }

        fn as_uuid(&self) -> Uuid {
            self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        id: Option<TagId>,
        label: String,
    }

    impl Tag {
        fn stored(label: &str) -> Self {
            Self {
                id: Some(TagId::generate()),
                label: label.to_string(),
            }
        }
    }

    impl Entity for Tag {
        type Id = TagId;
        const NAME: &'static str = "Tag";

        fn id(&self) -> Option<&TagId> {
            self.id.as_ref()
        }

        fn assign_id(&mut self, id: TagId) {
            self.id = Some(id);
        }
    }

    fn id_of(tag: &Tag) -> TagId {
        tag.id.clone().unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_fetch_returns_equal_copy() {
        let ctx = InMemoryContext::new();
        let tag = Tag::stored("travel");

        ctx.insert(&tag).await.unwrap();
        let fetched: Option<Tag> = ctx.fetch(&id_of(&tag)).await.unwrap();

        assert_eq!(fetched, Some(tag));
    }

    #[tokio::test]
    async fn test_insert_without_identity_is_rejected() {
        let ctx = InMemoryContext::new();
        let tag = Tag {
            id: None,
            label: "x".to_string(),
        };

        let err = ctx.insert(&tag).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_persistence_error() {
        let ctx = InMemoryContext::new();
        let tag = Tag::stored("dup");

        ctx.insert(&tag).await.unwrap();
        let err = ctx.insert(&tag).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_fetch_all_is_ordered_by_identity() {
        let ctx = InMemoryContext::new();
        let first = Tag::stored("first");
        let second = Tag::stored("second");

        ctx.insert(&second).await.unwrap();
        ctx.insert(&first).await.unwrap();

        let all: Vec<Tag> = ctx.fetch_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_page_and_count() {
        let ctx = InMemoryContext::new();
        let tags: Vec<Tag> = (0..5).map(|i| Tag::stored(&format!("t{}", i))).collect();
        for tag in &tags {
            ctx.insert(tag).await.unwrap();
        }

        let page: Vec<Tag> = ctx.fetch_page(2, 3).await.unwrap();
        assert_eq!(page, tags[3..5].to_vec());
        assert_eq!(EntityStore::<Tag>::count(&ctx).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_replace_and_remove_report_hits() {
        let ctx = InMemoryContext::new();
        let mut tag = Tag::stored("old");

        assert!(!ctx.replace(&tag).await.unwrap());
        ctx.insert(&tag).await.unwrap();

        tag.label = "new".to_string();
        assert!(ctx.replace(&tag).await.unwrap());
        let fetched: Tag = ctx.fetch(&id_of(&tag)).await.unwrap().unwrap();
        assert_eq!(fetched.label, "new");

        assert!(EntityStore::<Tag>::remove(&ctx, &id_of(&tag)).await.unwrap());
        assert!(!EntityStore::<Tag>::remove(&ctx, &id_of(&tag)).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_context() {
        let ctx = InMemoryContext::new();

        let all: Vec<Tag> = ctx.fetch_all().await.unwrap();
        assert!(all.is_empty());
        assert_eq!(EntityStore::<Tag>::count(&ctx).await.unwrap(), 0);
    }
}
