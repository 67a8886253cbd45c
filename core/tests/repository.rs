mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use oarlock::{
    Condition, Converter, ConvertingRepository, CudRepository, EntityRepository, Filter, Join,
    Page, PageRequest, Preload, ReadRepository, RepoError, Where,
};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RelationTrait, Transaction, Value};

use common::{User, transaction_log, user_row, users};

#[tokio::test]
async fn find_by_returns_none_when_nothing_matches() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let found = repo
        .find_by(Where::new(Condition::equal("username", "ghost")), &[])
        .await
        .unwrap();

    assert_eq!(found, None);
    drop(repo);
    assert_eq!(
        transaction_log(db),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT "users"."id", "users"."username", "users"."password", "users"."person_id" FROM "users" WHERE username = $1 LIMIT $2"#,
            ["ghost".into(), 1u64.into()],
        )]
    );
}

#[tokio::test]
async fn find_by_maps_the_row_through_the_converter() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_row(1, "jdoe")]])
        .into_connection();
    let repo = ConvertingRepository::<users::Entity, User>::new(db);

    let found = repo
        .find_by(Where::new(Condition::equal("username", "jdoe")), &[])
        .await
        .unwrap();

    assert_eq!(
        found,
        Some(User {
            id: 1,
            username: "jdoe".to_owned(),
            password: "123".to_owned(),
            person_id: 1,
        })
    );
}

#[tokio::test]
async fn find_by_joins_the_preloaded_relation() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_row(1, "jdoe")]])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let preload = Preload::new(|| users::Relation::Persons.def());
    repo.find_by(
        Where::new(Condition::equal("persons.name", "Jane Doe")),
        &[preload],
    )
    .await
    .unwrap();

    drop(repo);
    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains(r#"LEFT JOIN "persons""#), "got: {sql}");
}

#[tokio::test]
async fn create_writes_the_generated_key_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_row(7, "jdoe")]])
        .into_connection();
    let repo = EntityRepository::<users::Entity>::new(db);

    let mut model = user_row(0, "jdoe");
    repo.create(&mut model).await.unwrap();

    assert_eq!(model.id, 7);
}

#[tokio::test]
async fn create_all_splits_into_batches_and_writes_back() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![user_row(1, "a"), user_row(2, "b")],
                vec![user_row(3, "c")],
            ])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let mut models = [user_row(0, "a"), user_row(0, "b"), user_row(0, "c")];
    repo.create_all(&mut models, 2).await.unwrap();

    assert_eq!([models[0].id, models[1].id, models[2].id], [1, 2, 3]);
    drop(repo);
    assert_eq!(transaction_log(db).len(), 2);
}

#[tokio::test]
async fn create_all_rejects_a_zero_batch_size() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let result = repo.create_all(&mut [user_row(0, "a")], 0).await;

    assert!(matches!(result, Err(RepoError::InvalidBatchSize(0))));
    drop(repo);
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn save_writes_the_stored_row_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_row(5, "renamed")]])
        .into_connection();
    let repo = ConvertingRepository::<users::Entity, User>::new(db);

    let mut model = User {
        id: 5,
        username: "renamed".to_owned(),
        password: "123".to_owned(),
        person_id: 1,
    };
    repo.save(&mut model).await.unwrap();

    assert_eq!(model.username, "renamed");
    assert_eq!(model.id, 5);
}

#[tokio::test]
async fn delete_issues_a_single_delete() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection(),
    );
    let repo = ConvertingRepository::<users::Entity, User>::new(db.clone());

    let model = User::from_entity(user_row(5, "jdoe"));
    repo.delete(&model).await.unwrap();

    drop(repo);
    assert_eq!(transaction_log(db).len(), 1);
}

#[tokio::test]
async fn delete_all_by_refuses_joined_conditions() {
    let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let result = repo
        .delete_all_by(
            Where::new(Condition::equal("persons.name", "Jane Doe"))
                .join(Join::inner("persons", "persons.id = users.person_id")),
        )
        .await;

    assert!(matches!(result, Err(RepoError::UnsupportedJoin)));
    drop(repo);
    assert!(transaction_log(db).is_empty());
}

#[tokio::test]
async fn delete_all_by_deletes_matching_rows() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    repo.delete_all_by(Where::new(Condition::like("username", "batch%")))
        .await
        .unwrap();

    drop(repo);
    assert_eq!(
        transaction_log(db),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM "users" WHERE username LIKE $1"#,
            ["batch%".into()],
        )]
    );
}

#[tokio::test]
async fn count_reads_the_total() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
        .into_connection();
    let repo = EntityRepository::<users::Entity>::new(db);

    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn count_by_counts_only_matching_rows() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(2)))])]])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let total = repo
        .count_by(Where::new(Condition::equal("person_id", 1)))
        .await
        .unwrap();

    assert_eq!(total, 2);
    drop(repo);
    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("num_items"), "got: {sql}");
    assert!(sql.contains("person_id = "), "got: {sql}");
}

#[tokio::test]
async fn paginated_read_returns_total_and_elements() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(3)))])]])
        .append_query_results([vec![user_row(1, "a"), user_row(2, "b")]])
        .into_connection();
    let repo = ConvertingRepository::<users::Entity, User>::new(db);

    let request = PageRequest::new(1, 2)
        .unwrap()
        .with_filter(Filter::new().field("password = ?", "123"));
    let page = repo.find_all_paginated(&request, &[]).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.elements.len(), 2);
    assert_eq!(page.elements[0].username, "a");
}

#[tokio::test]
async fn paginated_read_skips_the_element_query_when_empty() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(0)))])]])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let page = repo
        .find_all_paginated(&PageRequest::default(), &[])
        .await
        .unwrap();

    assert_eq!(page, Page::empty());
    drop(repo);
    assert_eq!(transaction_log(db).len(), 1);
}

#[tokio::test]
async fn paginated_by_counts_with_the_where_applied() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::BigInt(Some(0)))])]])
            .into_connection(),
    );
    let repo = EntityRepository::<users::Entity>::new(db.clone());

    let page = repo
        .find_all_paginated_by(
            &PageRequest::default(),
            Where::new(Condition::equal("username", "ghost")),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(page, Page::empty());
    drop(repo);
    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("username = "), "got: {sql}");
}
