//! In-memory stand-in for the search index, so that tests do not need a
//! text index to be built before every search.

use std::{collections::BTreeMap, sync::Mutex};

use rocket::{Build, Rocket};

use crate::error::Result;
use crate::model::{
    db::{Answer, Entity, Question, Section},
    pagination::{Page, Pageable},
    EntityId,
};

use super::{SearchIndex, SearchRepository};

/// Keeps indexed entities in a map and matches case-insensitive substrings
/// of their text. Results are always ordered by ID.
pub struct InMemorySearchRepository<T> {
    documents: Mutex<BTreeMap<EntityId, T>>,
}

impl<T> Default for InMemorySearchRepository<T> {
    fn default() -> Self {
        Self {
            documents: Mutex::new(BTreeMap::new()),
        }
    }
}

#[rocket::async_trait]
impl<T: Entity> SearchRepository<T> for InMemorySearchRepository<T> {
    async fn index(&self, entity: &T) -> Result<()> {
        if let Some(id) = entity.id() {
            self.documents.lock().unwrap().insert(id, entity.clone());
        }
        Ok(())
    }

    async fn remove(&self, id: EntityId) -> Result<()> {
        self.documents.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str, pageable: &Pageable) -> Result<Page<T>> {
        let needle = query.trim().to_lowercase();
        let documents = self.documents.lock().unwrap();
        let matches = documents
            .values()
            .filter(|entity| {
                needle.is_empty()
                    || entity
                        .search_text()
                        .map_or(false, |text| text.to_lowercase().contains(&needle))
            })
            .collect::<Vec<_>>();
        let total = matches.len() as u64;
        let content = matches
            .into_iter()
            .skip(pageable.offset() as usize)
            .take(pageable.size() as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, total, pageable))
    }
}

/// Manage in-memory search repositories for every entity, in place of the
/// database-backed ones.
pub fn in_memory_search(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .manage(SearchIndex::new(InMemorySearchRepository::<Section>::default()))
        .manage(SearchIndex::new(InMemorySearchRepository::<Question>::default()))
        .manage(SearchIndex::new(InMemorySearchRepository::<Answer>::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: EntityId, text: &str) -> Section {
        Section {
            id: Some(id),
            text: Some(text.to_string()),
        }
    }

    #[rocket::async_test]
    async fn search_matches_substrings_case_insensitively() {
        let repository = InMemorySearchRepository::default();
        repository.index(&section(1, "Personal details")).await.unwrap();
        repository.index(&section(2, "Work history")).await.unwrap();
        repository.index(&section(3, "Personal goals")).await.unwrap();

        let page = repository
            .search("PERSONAL", &Pageable::new(0, 20))
            .await
            .unwrap();
        assert_eq!(page.total(), 2);
        let ids = page.content().iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(1), Some(3)]);
    }

    #[rocket::async_test]
    async fn reindex_replaces_and_remove_forgets() {
        let repository = InMemorySearchRepository::default();
        repository.index(&section(1, "Old")).await.unwrap();
        repository.index(&section(1, "New")).await.unwrap();
        assert_eq!(repository.search("old", &Pageable::new(0, 20)).await.unwrap().total(), 0);
        assert_eq!(repository.search("new", &Pageable::new(0, 20)).await.unwrap().total(), 1);

        repository.remove(1).await.unwrap();
        assert_eq!(repository.search("", &Pageable::new(0, 20)).await.unwrap().total(), 0);
    }

    #[rocket::async_test]
    async fn blank_query_pages_through_everything() {
        let repository = InMemorySearchRepository::default();
        for id in 1..=5 {
            repository.index(&section(id, "Section")).await.unwrap();
        }
        let page = repository.search(" ", &Pageable::new(1, 2)).await.unwrap();
        assert_eq!(page.total(), 5);
        let ids = page.content().iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(3), Some(4)]);
    }
}
