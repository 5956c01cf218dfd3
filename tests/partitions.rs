mod common;
use common::*;

#[tokio::test]
async fn monthly_range_over_dates() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query(
        r#"
        CREATE TABLE usage (
            id SERIAL,
            usage_start DATE NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO usage (usage_start) VALUES ('2020-01-15'), ('2020-02-01'), ('2020-03-10')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - usage:
        partition_key: usage_start
        partition_type: range
        range:
          interval_type: month
          interval: 1
"#,
    );
    let config = Config::load(config_file.path()).unwrap();

    let sink = ExecutionSink::live(pool.clone());
    let summary = orchestrator::run(&sink, &config).await.unwrap();

    assert_eq!(summary.tables_transformed, 1);
    // default + 4 monthly children (2020_01..2020_04, overshooting by one past March).
    assert_eq!(summary.partitions_created, 5);

    let row_count: i64 = sqlx::query_scalar("SELECT count(*) FROM usage")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row_count, 3);

    let child_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pg_class WHERE relname = 'usage_2020_04')",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(child_exists, "expected overshoot partition usage_2020_04");
}

#[tokio::test]
async fn yearly_range_over_integers() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query("CREATE TABLE readings (id SERIAL, year_col INT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO readings (year_col) VALUES (2018), (2019), (2021)")
        .execute(&pool)
        .await
        .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - readings:
        partition_key: year_col
        partition_type: range
        range:
          interval_type: year
          interval: 1
"#,
    );
    let config = Config::load(config_file.path()).unwrap();
    let sink = ExecutionSink::live(pool.clone());
    let summary = orchestrator::run(&sink, &config).await.unwrap();

    // default + 2018, 2019, 2020, 2021, 2022 (overshoot).
    assert_eq!(summary.partitions_created, 6);

    let child_exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_class WHERE relname = 'readings_2022')")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(child_exists);
}

#[tokio::test]
async fn list_partition_over_strings() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query("CREATE TABLE statuses (id SERIAL, status TEXT NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO statuses (status) VALUES ('A'), ('B'), ('C')")
        .execute(&pool)
        .await
        .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - statuses:
        partition_key: status
        partition_type: list
        list:
          values:
            - ["A", "B"]
            - ["C"]
"#,
    );
    let config = Config::load(config_file.path()).unwrap();
    let sink = ExecutionSink::live(pool.clone());
    let summary = orchestrator::run(&sink, &config).await.unwrap();

    // default + two list buckets.
    assert_eq!(summary.partitions_created, 3);

    let ledger_row: (String,) = sqlx::query_as(
        "SELECT partition_type FROM partitioned_tables WHERE table_name = 'statuses_0'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(ledger_row.0, "list");
}

#[tokio::test]
async fn empty_temporal_source_falls_back_to_default_window() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query(
        "CREATE TABLE events (id SERIAL, occurred_at TIMESTAMP WITH TIME ZONE NOT NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - events:
        partition_key: occurred_at
        partition_type: range
        range:
          interval_type: month
          interval: 1
"#,
    );
    let config = Config::load(config_file.path()).unwrap();
    let sink = ExecutionSink::live(pool.clone());
    let summary = orchestrator::run(&sink, &config).await.unwrap();

    assert_eq!(summary.tables_transformed, 1);
    // At least the default partition plus the 12-month fallback window.
    assert!(summary.partitions_created >= 13);
}

#[tokio::test]
async fn script_mode_leaves_source_table_untouched() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query("CREATE TABLE orders (id SERIAL, placed_on DATE NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO orders (placed_on) VALUES ('2021-05-01')")
        .execute(&pool)
        .await
        .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - orders:
        partition_key: placed_on
        partition_type: range
        range:
          interval_type: month
          interval: 1
"#,
    );
    let config = Config::load(config_file.path()).unwrap();

    let script_file = NamedTempFile::new().unwrap();
    let sink = ExecutionSink::script(pool.clone(), script_file.path().to_path_buf()).unwrap();
    orchestrator::run(&sink, &config).await.unwrap();

    let script_contents = std::fs::read_to_string(script_file.path()).unwrap();
    assert!(script_contents.contains("BEGIN;"));
    assert!(script_contents.contains("LOCK TABLE"));
    assert!(script_contents.contains("RENAME TO"));
    assert!(script_contents.contains("COMMIT;"));

    // The source table was never actually swapped: it still exists under its
    // original name, and the parallel build table was never renamed into place.
    let original_is_unpartitioned: bool = sqlx::query_scalar(
        "SELECT NOT EXISTS (SELECT 1 FROM pg_partitioned_table pt JOIN pg_class c ON c.oid = pt.partrelid WHERE c.relname = 'orders')",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(original_is_unpartitioned);

    let row_count: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row_count, 1);
}

#[tokio::test]
async fn drop_table_directive_removes_renamed_source() {
    let (_container, url) = setup_postgres().await;
    let connection = PgConnection::new(&url).await.unwrap();
    let pool = connection.pool().clone();

    sqlx::query("CREATE TABLE archive_rows (id SERIAL, placed_on DATE NOT NULL)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO archive_rows (placed_on) VALUES ('2022-01-01')")
        .execute(&pool)
        .await
        .unwrap();

    let config_file = write_config(
        r#"
partition_targets:
  public:
    - archive_rows:
        partition_key: placed_on
        partition_type: range
        range:
          interval_type: month
          interval: 1
        drop_table: true
"#,
    );
    let config = Config::load(config_file.path()).unwrap();
    let sink = ExecutionSink::live(pool.clone());
    orchestrator::run(&sink, &config).await.unwrap();

    let renamed_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM pg_class WHERE relname = '__archive_rows')",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(!renamed_exists, "__archive_rows should be dropped when drop_table is true");

    let row_count: i64 = sqlx::query_scalar("SELECT count(*) FROM archive_rows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(row_count, 1, "row should have been copied into the partitioned table");
}
