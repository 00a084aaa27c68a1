//! Job store behavior against an in-memory SQLite database: URL uniqueness,
//! list filtering and ordering, the applied_at invariant, and stat counts.

mod helpers;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

use jobdash::app_state::AppState;
use jobdash::db::queries;
use jobdash::error::ApiError;
use jobdash::models::job::{JobFilter, JobUpdate};
use jobdash::routes;

use helpers::{new_job, test_pool};

#[tokio::test]
async fn test_duplicate_url_insert_is_a_noop() {
    let pool = test_pool().await;

    let mut first = new_job("https://example.com/j1", "Software Engineer");
    first.company = "Original Co".to_string();
    assert!(queries::insert_job_ignore_duplicate(&pool, &first)
        .await
        .unwrap());

    let mut second = new_job("https://example.com/j1", "Different Title");
    second.company = "Other Co".to_string();
    assert!(!queries::insert_job_ignore_duplicate(&pool, &second)
        .await
        .unwrap());

    let jobs = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap();
    assert_eq!(jobs.len(), 1);
    // The original row is untouched by the second attempt.
    assert_eq!(jobs[0].company, "Original Co");
    assert_eq!(jobs[0].title, "Software Engineer");
}

#[tokio::test]
async fn test_new_rows_get_store_defaults() {
    let pool = test_pool().await;
    queries::insert_job_ignore_duplicate(&pool, &new_job("u1", "QA Engineer"))
        .await
        .unwrap();

    let job = &queries::list_jobs(&pool, &JobFilter::default()).await.unwrap()[0];
    assert_eq!(job.status, "new");
    assert!(!job.checked);
    assert_eq!(job.notes, "");
    assert!(job.applied_at.is_none());
}

#[tokio::test]
async fn test_list_orders_by_date_desc_nulls_last() {
    let pool = test_pool().await;

    let mut older = new_job("u1", "A");
    older.date_posted = NaiveDate::from_ymd_opt(2026, 8, 10);
    let mut newer = new_job("u2", "B");
    newer.date_posted = NaiveDate::from_ymd_opt(2026, 8, 20);
    let undated = new_job("u3", "C");

    for job in [&older, &undated, &newer] {
        queries::insert_job_ignore_duplicate(&pool, job).await.unwrap();
    }

    let jobs = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap();
    let urls: Vec<&str> = jobs.iter().map(|j| j.job_url.as_str()).collect();
    assert_eq!(urls, vec!["u2", "u1", "u3"]);
}

#[tokio::test]
async fn test_list_filters() {
    let pool = test_pool().await;

    queries::insert_job_ignore_duplicate(&pool, &new_job("u1", "Software Engineer"))
        .await
        .unwrap();
    let mut other = new_job("u2", "Data Analyst");
    other.company = "Globex".to_string();
    queries::insert_job_ignore_duplicate(&pool, &other).await.unwrap();

    // Mark u1 applied and checked.
    let update = JobUpdate {
        checked: Some(true),
        status: Some("applied".to_string()),
        notes: None,
    };
    let id = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap()
        .iter()
        .find(|j| j.job_url == "u1")
        .unwrap()
        .id;
    queries::update_job(&pool, id, &update).await.unwrap();

    // Exact status match.
    let applied = queries::list_jobs(
        &pool,
        &JobFilter {
            status: Some("applied".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].job_url, "u1");

    // "all" sentinel disables the status filter.
    let all = queries::list_jobs(
        &pool,
        &JobFilter {
            status: Some("all".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(all.len(), 2);

    // Checked filter.
    let unchecked = queries::list_jobs(
        &pool,
        &JobFilter {
            checked: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(unchecked.len(), 1);
    assert_eq!(unchecked[0].job_url, "u2");

    // Case-insensitive substring search over title, company, location.
    let by_title = queries::list_jobs(
        &pool,
        &JobFilter {
            search: Some("software".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].job_url, "u1");

    let by_company = queries::list_jobs(
        &pool,
        &JobFilter {
            search: Some("globex".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_company.len(), 1);
    assert_eq!(by_company[0].job_url, "u2");
}

#[tokio::test]
async fn test_applied_at_follows_status() {
    let pool = test_pool().await;
    queries::insert_job_ignore_duplicate(&pool, &new_job("u1", "Engineer"))
        .await
        .unwrap();
    let id = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap()[0].id;

    // Into "applied": applied_at becomes today's date.
    let update = JobUpdate {
        status: Some("applied".to_string()),
        ..Default::default()
    };
    assert!(queries::update_job(&pool, id, &update).await.unwrap());
    let job = queries::get_job(&pool, id).await.unwrap().unwrap();
    assert_eq!(job.applied_at, Some(Utc::now().date_naive()));

    // Away from "applied": cleared.
    let update = JobUpdate {
        status: Some("interviewing".to_string()),
        ..Default::default()
    };
    queries::update_job(&pool, id, &update).await.unwrap();
    let job = queries::get_job(&pool, id).await.unwrap().unwrap();
    assert!(job.applied_at.is_none());

    // Updating only notes leaves status and applied_at untouched.
    let update = JobUpdate {
        notes: Some("phone screen Friday".to_string()),
        ..Default::default()
    };
    queries::update_job(&pool, id, &update).await.unwrap();
    let job = queries::get_job(&pool, id).await.unwrap().unwrap();
    assert_eq!(job.status, "interviewing");
    assert_eq!(job.notes, "phone screen Friday");
    assert!(job.applied_at.is_none());
}

#[tokio::test]
async fn test_update_and_delete_missing_id() {
    let pool = test_pool().await;

    let update = JobUpdate {
        checked: Some(true),
        ..Default::default()
    };
    assert!(!queries::update_job(&pool, 9999, &update).await.unwrap());
    assert!(!queries::delete_job(&pool, 9999).await.unwrap());
}

#[tokio::test]
async fn test_empty_update_rejected_at_boundary() {
    let pool = test_pool().await;
    queries::insert_job_ignore_duplicate(&pool, &new_job("u1", "Engineer"))
        .await
        .unwrap();
    let id = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap()[0].id;

    let state = AppState::new(pool.clone(), None, PathBuf::from("unused.csv"));
    let result =
        routes::jobs::update_job(State(state), Path(id), Json(JobUpdate::default())).await;

    assert!(matches!(result, Err(ApiError::Validation(_))));

    // Store unchanged.
    let job = queries::get_job(&pool, id).await.unwrap().unwrap();
    assert_eq!(job.status, "new");
    assert!(!job.checked);
}

#[tokio::test]
async fn test_list_handler_returns_total() {
    let pool = test_pool().await;
    queries::insert_job_ignore_duplicate(&pool, &new_job("u1", "Engineer"))
        .await
        .unwrap();
    queries::insert_job_ignore_duplicate(&pool, &new_job("u2", "Tester"))
        .await
        .unwrap();

    let state = AppState::new(pool, None, PathBuf::from("unused.csv"));
    let Json(response) = routes::jobs::list_jobs(State(state), Query(JobFilter::default()))
        .await
        .unwrap();
    assert_eq!(response.total, 2);
    assert_eq!(response.jobs.len(), 2);
}

#[tokio::test]
async fn test_stats_counts() {
    let pool = test_pool().await;

    let mut linkedin_job = new_job("u1", "Engineer");
    linkedin_job.site = "linkedin".to_string();
    queries::insert_job_ignore_duplicate(&pool, &linkedin_job).await.unwrap();
    queries::insert_job_ignore_duplicate(&pool, &new_job("u2", "Tester"))
        .await
        .unwrap();
    queries::insert_job_ignore_duplicate(&pool, &new_job("u3", "Developer"))
        .await
        .unwrap();

    let id = queries::list_jobs(&pool, &JobFilter::default()).await.unwrap()
        .iter()
        .find(|j| j.job_url == "u2")
        .unwrap()
        .id;
    let update = JobUpdate {
        checked: Some(true),
        status: Some("applied".to_string()),
        notes: None,
    };
    queries::update_job(&pool, id, &update).await.unwrap();

    assert_eq!(queries::count_total(&pool).await.unwrap(), 3);
    assert_eq!(queries::count_checked(&pool).await.unwrap(), 1);

    let by_status = queries::count_by_status(&pool).await.unwrap();
    assert_eq!(by_status.get("new"), Some(&2));
    assert_eq!(by_status.get("applied"), Some(&1));

    let by_site = queries::count_by_site(&pool).await.unwrap();
    assert_eq!(by_site.get("indeed"), Some(&2));
    assert_eq!(by_site.get("linkedin"), Some(&1));
}
