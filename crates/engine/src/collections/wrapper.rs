//! Entry collection - uniform CRUD over any resolved host collection.

use docsource_domain::{
    Criteria, DocumentBlob, DocumentId, EntryKind, GetResult, LiveEntry, NewDocument,
    RawDocument, SourceDescriptor,
};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;

use super::blob::document_blob;
use super::resolver::{Backend, CollectionHandle, CollectionResolver};
use crate::infrastructure::ports::{HostServices, StoreError};

type HandleFuture = Shared<BoxFuture<'static, Result<CollectionHandle, StoreError>>>;

/// CRUD over the entries of one kind at one source.
///
/// The backing collection is resolved once, starting at construction. Every
/// operation awaits that same resolution; a resolution failure is returned by
/// every operation and never retried.
pub struct EntryCollection {
    kind: EntryKind,
    source: SourceDescriptor,
    handle: HandleFuture,
}

impl EntryCollection {
    pub fn new(services: HostServices, kind: EntryKind, source: SourceDescriptor) -> Self {
        let resolver = CollectionResolver::new(services);
        let target = source.clone();
        let handle = async move { resolver.resolve(kind, &target).await }
            .boxed()
            .shared();

        // Start resolving right away when a runtime is available; otherwise the
        // first operation drives it.
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(handle.clone());
        }

        Self {
            kind,
            source,
            handle,
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn source(&self) -> &SourceDescriptor {
        &self.source
    }

    /// The resolved collection.
    pub async fn handle(&self) -> Result<CollectionHandle, StoreError> {
        self.handle.clone().await
    }

    /// Create one document per record in a single bulk call.
    ///
    /// Token-scoped sources do not support creation: nothing is written and
    /// an empty list is returned.
    ///
    /// Every record must be a JSON object. A rejected record fails the whole
    /// call before the host is touched.
    #[tracing::instrument(
        skip(self, records),
        fields(kind = %self.kind, source = %self.source, count = records.len())
    )]
    pub async fn create_many(&self, records: Vec<Value>) -> Result<Vec<GetResult>, StoreError> {
        if self.source.is_token_scoped() {
            let err = StoreError::unsupported(format!(
                "cannot create {} entries through {}",
                self.kind, self.source
            ));
            tracing::warn!(error = %err, "Skipping create");
            return Ok(Vec::new());
        }

        let handle = self.handle().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let documents = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                NewDocument::from_record(self.kind, record)
                    .map_err(|err| StoreError::invalid_record(index, err))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let context = handle.write_context();
        let created = match handle.backend() {
            Backend::Live(collection) => collection.create_documents(documents, context).await?,
            Backend::Pack(pack) => pack.create_documents(documents, context).await?,
        };

        created
            .into_iter()
            .map(|doc| GetResult::from_document(doc).map_err(StoreError::from))
            .collect()
    }

    /// Write back entries in a single bulk call, reconciling each entry's
    /// name with its document's top-level name first.
    #[tracing::instrument(
        skip(self, entries),
        fields(kind = %self.kind, source = %self.source, count = entries.len())
    )]
    pub async fn update(&self, entries: &mut [LiveEntry]) -> Result<(), StoreError> {
        let handle = self.handle().await?;
        if entries.is_empty() {
            return Ok(());
        }

        let blobs: Vec<DocumentBlob> = entries.iter_mut().map(document_blob).collect();
        let context = handle.write_context();
        match handle.backend() {
            Backend::Live(collection) => collection.update_documents(blobs, context).await,
            Backend::Pack(pack) => pack.update_documents(blobs, context).await,
        }
    }

    pub async fn destroy(&self, id: DocumentId) -> Result<(), StoreError> {
        self.destroy_many(vec![id]).await
    }

    /// Delete documents in a single bulk call.
    #[tracing::instrument(
        skip(self, ids),
        fields(kind = %self.kind, source = %self.source, count = ids.len())
    )]
    pub async fn destroy_many(&self, ids: Vec<DocumentId>) -> Result<(), StoreError> {
        let handle = self.handle().await?;
        if ids.is_empty() {
            return Ok(());
        }

        let context = handle.write_context();
        match handle.backend() {
            Backend::Live(collection) => collection.delete_documents(ids, context).await,
            Backend::Pack(pack) => pack.delete_documents(ids, context).await,
        }
    }

    /// Document `id`, or `None` when absent, of another kind, or unreadable.
    pub async fn get(&self, id: DocumentId) -> Result<Option<GetResult>, StoreError> {
        let handle = self.handle().await?;
        let doc = match handle.backend() {
            Backend::Pack(pack) => pack.get_document(id).await?,
            Backend::Live(collection) => collection.get(id),
        };

        Ok(doc
            .filter(|doc| self.admits(doc))
            .and_then(|doc| self.readable(doc)))
    }

    pub async fn exists(&self, id: DocumentId) -> Result<bool, StoreError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Documents of this kind whose nested data equals every criterion.
    ///
    /// Documents whose data cannot be read as an entry are left out.
    pub async fn query(&self, criteria: Criteria) -> Result<Vec<GetResult>, StoreError> {
        let handle = self.handle().await?;
        let docs = match handle.backend() {
            Backend::Pack(pack) => pack.get_documents(criteria, self.kind).await?,
            Backend::Live(collection) => collection
                .contents()
                .into_iter()
                .filter(|doc| self.admits(doc) && doc.matches(&criteria))
                .collect(),
        };

        Ok(docs
            .into_iter()
            .filter_map(|doc| self.readable(doc))
            .collect())
    }

    /// First document matching `criteria`.
    pub async fn lookup(&self, criteria: Criteria) -> Result<Option<GetResult>, StoreError> {
        Ok(self.query(criteria).await?.into_iter().next())
    }

    /// Every document of this kind.
    pub async fn enumerate(&self) -> Result<Vec<GetResult>, StoreError> {
        self.query(Criteria::new()).await
    }

    fn admits(&self, doc: &RawDocument) -> bool {
        if doc.kind == self.kind {
            return true;
        }
        let mismatch = StoreError::KindMismatch {
            expected: self.kind,
            found: doc.kind,
        };
        tracing::debug!(id = %doc.id, reason = %mismatch, "Omitting document");
        false
    }

    fn readable(&self, doc: RawDocument) -> Option<GetResult> {
        let id = doc.id;
        match GetResult::from_document(doc) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!(
                    %id,
                    kind = %self.kind,
                    error = %err,
                    "Omitting unreadable document"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infrastructure::ports::{
        MockLiveCollection, MockPackCollection, MockPackRegistry, MockSceneRegistry,
        MockWorldDirectory, PackCollection, WriteContext,
    };
    use docsource_domain::{PackId, SceneId, TokenId};
    use serde_json::json;

    fn services(
        world: MockWorldDirectory,
        packs: MockPackRegistry,
        scenes: MockSceneRegistry,
    ) -> HostServices {
        HostServices::new(Arc::new(world), Arc::new(packs), Arc::new(scenes))
    }

    fn world_items(items: MockLiveCollection) -> HostServices {
        let items: Arc<MockLiveCollection> = Arc::new(items);
        let mut world = MockWorldDirectory::new();
        world.expect_items().returning(move || items.clone());
        services(world, MockPackRegistry::new(), MockSceneRegistry::new())
    }

    fn pack_services(pack: MockPackCollection) -> HostServices {
        let pack: Arc<dyn PackCollection> = Arc::new(pack);
        let mut packs = MockPackRegistry::new();
        packs.expect_pack().returning(move |_| Some(pack.clone()));
        services(MockWorldDirectory::new(), packs, MockSceneRegistry::new())
    }

    fn doc(kind: EntryKind, name: &str, data: Value) -> RawDocument {
        RawDocument::new(DocumentId::new(), kind, name, data)
    }

    #[tokio::test]
    async fn resolution_happens_once_for_many_operations() {
        let mut pack = MockPackCollection::new();
        pack.expect_pack_id().return_const(PackId::new("world.skill"));
        pack.expect_get_document().returning(|_| Ok(None));
        pack.expect_get_documents().returning(|_, _| Ok(vec![]));
        let pack: Arc<dyn PackCollection> = Arc::new(pack);
        let mut packs = MockPackRegistry::new();
        packs
            .expect_pack()
            .times(1)
            .returning(move |_| Some(pack.clone()));
        let services = services(MockWorldDirectory::new(), packs, MockSceneRegistry::new());

        let skills = EntryCollection::new(services, EntryKind::Skill, SourceDescriptor::CorePack);

        assert!(skills.get(DocumentId::new()).await.expect("resolves").is_none());
        assert!(skills.enumerate().await.expect("resolves").is_empty());
    }

    #[tokio::test]
    async fn resolution_failure_rejects_every_operation() {
        let mut packs = MockPackRegistry::new();
        packs.expect_pack().times(1).returning(|_| None);
        let services = services(MockWorldDirectory::new(), packs, MockSceneRegistry::new());

        let skills = EntryCollection::new(
            services,
            EntryKind::Skill,
            SourceDescriptor::compendium("missing.pack"),
        );

        let expected = StoreError::not_found("Pack", "missing.pack");
        assert_eq!(skills.get(DocumentId::new()).await.unwrap_err(), expected);
        assert_eq!(skills.enumerate().await.unwrap_err(), expected);
        assert_eq!(
            skills.create_many(vec![json!({"name": "Hack"})]).await.unwrap_err(),
            expected
        );
        assert_eq!(skills.destroy(DocumentId::new()).await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn create_many_tags_records_and_issues_one_bulk_call() {
        let mut items = MockLiveCollection::new();
        items
            .expect_create_documents()
            .times(1)
            .withf(|records, context| {
                records.len() == 2
                    && records.iter().all(|r| r.kind == EntryKind::Gear)
                    && records[0].name == "Rope"
                    && records[1].name == "New Gear"
                    && *context == WriteContext::default()
            })
            .returning(|records, _| {
                Ok(records
                    .into_iter()
                    .map(|r| RawDocument::new(DocumentId::new(), r.kind, r.name, r.data))
                    .collect())
            });

        let gear =
            EntryCollection::new(world_items(items), EntryKind::Gear, SourceDescriptor::World);
        let created = gear
            .create_many(vec![json!({"name": "Rope"}), json!({"weight": 1})])
            .await
            .expect("bulk create");

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].data, json!({"name": "Rope"}));
        assert_eq!(created[1].data, json!({"weight": 1}));
        assert!(created.iter().all(|r| r.kind == EntryKind::Gear));
    }

    #[tokio::test]
    async fn create_many_through_token_scoped_source_is_a_no_op() {
        let mut scenes = MockSceneRegistry::new();
        scenes.expect_scene().returning(|_| None);
        let services = services(MockWorldDirectory::new(), MockPackRegistry::new(), scenes);

        let systems = EntryCollection::new(
            services,
            EntryKind::System,
            SourceDescriptor::scene_token(SceneId::new(), TokenId::new()),
        );

        let created = systems
            .create_many(vec![json!({"name": "Shield"})])
            .await
            .expect("unsupported create is not an error");
        assert!(created.is_empty());
    }

    #[tokio::test]
    async fn get_returns_none_for_other_kinds() {
        let talent = doc(EntryKind::Talent, "Ace", json!({"name": "Ace"}));
        let talent_id = talent.id;
        let mut items = MockLiveCollection::new();
        items
            .expect_get()
            .returning(move |_| Some(talent.clone()));

        let skills =
            EntryCollection::new(world_items(items), EntryKind::Skill, SourceDescriptor::World);

        assert!(skills.get(talent_id).await.expect("resolves").is_none());
        assert!(!skills.exists(talent_id).await.expect("resolves"));
    }

    #[tokio::test]
    async fn live_query_filters_kind_then_criteria() {
        let hack = doc(EntryKind::Skill, "Hack", json!({"name": "Hack", "rank": 2}));
        let spot = doc(EntryKind::Skill, "Spot", json!({"name": "Spot", "rank": 1}));
        let ace = doc(EntryKind::Talent, "Ace", json!({"name": "Ace", "rank": 2}));
        let contents = vec![hack.clone(), spot.clone(), ace];
        let mut items = MockLiveCollection::new();
        items
            .expect_contents()
            .returning(move || contents.clone());

        let skills =
            EntryCollection::new(world_items(items), EntryKind::Skill, SourceDescriptor::World);

        let ranked = skills
            .query(Criteria::from([("rank".to_string(), json!(2))]))
            .await
            .expect("resolves");
        assert_eq!(ranked.iter().map(|r| r.id).collect::<Vec<_>>(), vec![hack.id]);

        let all = skills.enumerate().await.expect("resolves");
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![hack.id, spot.id]);

        let first = skills
            .lookup(Criteria::from([("rank".to_string(), json!(1))]))
            .await
            .expect("resolves");
        assert_eq!(first.map(|r| r.id), Some(spot.id));
    }

    #[tokio::test]
    async fn pack_query_delegates_criteria_and_kind() {
        let hack = doc(EntryKind::Skill, "Hack", json!({"name": "Hack", "rank": 2}));
        let returned = hack.clone();
        let mut pack = MockPackCollection::new();
        pack.expect_pack_id().return_const(PackId::new("world.skill"));
        pack.expect_get_documents()
            .times(1)
            .withf(|criteria, kind| {
                *kind == EntryKind::Skill && criteria.get("rank") == Some(&json!(2))
            })
            .returning(move |_, _| Ok(vec![returned.clone()]));

        let skills =
            EntryCollection::new(pack_services(pack), EntryKind::Skill, SourceDescriptor::CorePack);

        let found = skills
            .query(Criteria::from([("rank".to_string(), json!(2))]))
            .await
            .expect("resolves");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data, hack.data);
    }

    #[tokio::test]
    async fn pack_get_uses_async_document_fetch() {
        let hack = doc(EntryKind::Skill, "Hack", json!({"name": "Hack"}));
        let hack_id = hack.id;
        let mut pack = MockPackCollection::new();
        pack.expect_pack_id().return_const(PackId::new("world.skill"));
        pack.expect_get_document()
            .withf(move |id| *id == hack_id)
            .returning(move |_| Ok(Some(hack.clone())));

        let skills =
            EntryCollection::new(pack_services(pack), EntryKind::Skill, SourceDescriptor::CorePack);

        let found = skills.get(hack_id).await.expect("resolves").expect("present");
        assert_eq!(found.entity.name(), "Hack");
    }

    #[tokio::test]
    async fn update_sends_reconciled_blobs_with_pack_context() {
        let raw = doc(EntryKind::Skill, "Hack", json!({"name": "Hack"}));
        let mut entry = LiveEntry::from_document(&raw).expect("object data");
        entry.set_name("Hack and Slash");
        let entry_id = entry.id();

        let mut pack = MockPackCollection::new();
        pack.expect_pack_id().return_const(PackId::new("world.skill"));
        pack.expect_update_documents()
            .times(1)
            .withf(move |blobs, context| {
                blobs.len() == 1
                    && blobs[0].id() == Some(entry_id)
                    && blobs[0].get("name") == Some(&json!("Hack and Slash"))
                    && context.pack == Some(PackId::new("world.skill"))
            })
            .returning(|_, _| Ok(()));

        let skills =
            EntryCollection::new(pack_services(pack), EntryKind::Skill, SourceDescriptor::CorePack);

        let mut entries = vec![entry];
        skills.update(&mut entries).await.expect("bulk update");
        assert_eq!(entries[0].top_level().name, "Hack and Slash");
    }

    #[tokio::test]
    async fn destroy_issues_one_element_bulk_delete() {
        let id = DocumentId::new();
        let mut items = MockLiveCollection::new();
        items
            .expect_delete_documents()
            .times(1)
            .withf(move |ids, _| ids == &vec![id])
            .returning(|_, _| Ok(()));

        let gear =
            EntryCollection::new(world_items(items), EntryKind::Gear, SourceDescriptor::World);

        gear.destroy(id).await.expect("bulk delete");
    }

    #[tokio::test]
    async fn backend_errors_propagate() {
        let mut items = MockLiveCollection::new();
        items
            .expect_delete_documents()
            .returning(|_, _| Err(StoreError::backend("delete_documents", "host offline")));

        let gear =
            EntryCollection::new(world_items(items), EntryKind::Gear, SourceDescriptor::World);

        let err = gear.destroy(DocumentId::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_resolution() {
        let mut pack = MockPackCollection::new();
        pack.expect_pack_id().return_const(PackId::new("world.skill"));
        pack.expect_get_document().returning(|_| Ok(None));
        pack.expect_get_documents().returning(|_, _| Ok(vec![]));
        let pack: Arc<dyn PackCollection> = Arc::new(pack);
        let mut packs = MockPackRegistry::new();
        packs
            .expect_pack()
            .times(1)
            .returning(move |_| Some(pack.clone()));
        let services = services(MockWorldDirectory::new(), packs, MockSceneRegistry::new());

        let skills = EntryCollection::new(services, EntryKind::Skill, SourceDescriptor::CorePack);

        let (fetched, listed, handle) = tokio::join!(
            skills.get(DocumentId::new()),
            skills.enumerate(),
            skills.handle()
        );

        assert!(fetched.expect("resolves").is_none());
        assert!(listed.expect("resolves").is_empty());
        assert!(handle.expect("resolves").is_pack_backed());
    }

    #[tokio::test]
    async fn create_many_rejects_non_object_records_before_writing() {
        let mut items = MockLiveCollection::new();
        items.expect_create_documents().times(0);

        let gear =
            EntryCollection::new(world_items(items), EntryKind::Gear, SourceDescriptor::World);
        let err = gear
            .create_many(vec![json!({"name": "Rope"}), json!("Grapple"), json!(7)])
            .await
            .unwrap_err();

        assert!(
            matches!(err, StoreError::InvalidRecord { index: 1, .. }),
            "got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn unreadable_documents_are_left_out_of_reads() {
        let rope = doc(EntryKind::Gear, "Rope", json!({"name": "Rope"}));
        let broken = doc(EntryKind::Gear, "Broken", json!("Broken"));
        let lamp = doc(EntryKind::Gear, "Lamp", json!({"name": "Lamp"}));
        let broken_id = broken.id;
        let contents = vec![rope.clone(), broken.clone(), lamp.clone()];
        let mut items = MockLiveCollection::new();
        items
            .expect_contents()
            .returning(move || contents.clone());
        items.expect_get().returning(move |_| Some(broken.clone()));

        let gear =
            EntryCollection::new(world_items(items), EntryKind::Gear, SourceDescriptor::World);

        let all = gear.enumerate().await.expect("resolves");
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![rope.id, lamp.id]);
        assert!(gear.get(broken_id).await.expect("resolves").is_none());
    }
}
