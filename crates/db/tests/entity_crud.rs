//! Integration tests for the repository layer.
//!
//! Exercises the repositories against a real database:
//! - Project ownership and ordering
//! - Cascade delete of every dependent table
//! - Partial updates
//! - Filtered listing
//! - Subscription bookkeeping

use chrono::{Duration, Utc};
use devpulse_core::alert::{AlertSeverity, AlertStatus};
use devpulse_core::service_type::ServiceType;
use devpulse_core::subscription::{SubscriptionStatus, PREMIUM_TOKEN_BONUS};
use devpulse_core::widget::{WidgetPosition, WidgetType};
use devpulse_db::models::alert::{AlertFilter, CreateAlert, UpdateAlert};
use devpulse_db::models::dashboard_widget::CreateDashboardWidget;
use devpulse_db::models::metric::{CreateMetric, MetricFilter};
use devpulse_db::models::project::{CreateProject, UpdateProject};
use devpulse_db::models::service_integration::CreateServiceIntegration;
use devpulse_db::models::user::{CreateUser, User};
use devpulse_db::repositories::{
    AlertRepo, DashboardWidgetRepo, MetricRepo, ProjectRepo, ServiceIntegrationRepo, UserRepo,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap()
}

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: Some(format!("{name} description")),
    }
}

fn new_integration(project_id: i64, service_type: ServiceType) -> CreateServiceIntegration {
    CreateServiceIntegration {
        project_id,
        service_type,
        credentials: json!({ "apiKey": "key_12345678" }),
        active: None,
    }
}

fn new_alert(project_id: i64, title: &str, severity: AlertSeverity) -> CreateAlert {
    CreateAlert {
        project_id,
        service_type: ServiceType::Aws,
        title: title.to_string(),
        description: None,
        severity,
        status: None,
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_projects_listed_by_owner_and_name(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;

    ProjectRepo::create(&pool, alice.id, &new_project("Zeta")).await.unwrap();
    ProjectRepo::create(&pool, alice.id, &new_project("Alpha")).await.unwrap();
    ProjectRepo::create(&pool, bob.id, &new_project("Bob's")).await.unwrap();

    let projects = ProjectRepo::list_by_user(&pool, alice.id).await.unwrap();
    let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Zeta"]);
    assert_eq!(ProjectRepo::count_by_user(&pool, bob.id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_partial_update_keeps_other_fields(pool: PgPool) {
    let user = new_user(&pool, "updater").await;
    let project = ProjectRepo::create(&pool, user.id, &new_project("Before"))
        .await
        .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        project.id,
        &UpdateProject {
            name: Some("After".to_string()),
            description: None,
        },
    )
    .await
    .unwrap()
    .expect("project should exist");

    assert_eq!(updated.name, "After");
    assert_eq!(updated.description.as_deref(), Some("Before description"));
    assert!(updated.updated_at >= project.updated_at);

    let missing = ProjectRepo::update(&pool, 999_999, &UpdateProject::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_delete_removes_all_dependents(pool: PgPool) {
    let user = new_user(&pool, "cascader").await;
    let project = ProjectRepo::create(&pool, user.id, &new_project("Doomed"))
        .await
        .unwrap();
    let keeper = ProjectRepo::create(&pool, user.id, &new_project("Keeper"))
        .await
        .unwrap();

    for pid in [project.id, keeper.id] {
        ServiceIntegrationRepo::create(&pool, &new_integration(pid, ServiceType::Stytch))
            .await
            .unwrap();
        AlertRepo::create(&pool, &new_alert(pid, "CPU high", AlertSeverity::Warning))
            .await
            .unwrap();
        DashboardWidgetRepo::create(
            &pool,
            &CreateDashboardWidget {
                project_id: pid,
                name: "Signups".to_string(),
                widget_type: WidgetType::Chart,
                service_type: ServiceType::Stytch,
                metric_type: "newSignups".to_string(),
                configuration: None,
                position: WidgetPosition { x: 0, y: 0, w: 4, h: 2 },
            },
        )
        .await
        .unwrap();
        MetricRepo::create(
            &pool,
            &CreateMetric {
                project_id: pid,
                service_type: ServiceType::Stytch,
                metric_type: "dau".to_string(),
                value: json!(1500),
                timestamp: None,
            },
        )
        .await
        .unwrap();
    }

    assert!(ProjectRepo::delete(&pool, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());

    for table in ["service_integrations", "alerts", "dashboard_widgets", "metrics"] {
        let (orphans,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE project_id = $1"))
                .bind(project.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(orphans, 0, "{table} still references the deleted project");

        let (kept,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM {table} WHERE project_id = $1"))
                .bind(keeper.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(kept, 1, "{table} lost rows of an unrelated project");
    }

    assert!(!ProjectRepo::delete(&pool, project.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_child_insert_with_missing_project_fails(pool: PgPool) {
    let result = AlertRepo::create(&pool, &new_alert(424_242, "orphan", AlertSeverity::Info)).await;
    assert!(result.is_err(), "foreign key should reject orphan alerts");
}

// ---------------------------------------------------------------------------
// Integrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_integration_counts_span_all_user_projects(pool: PgPool) {
    let user = new_user(&pool, "counter").await;
    let a = ProjectRepo::create(&pool, user.id, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, user.id, &new_project("B")).await.unwrap();

    ServiceIntegrationRepo::create(&pool, &new_integration(a.id, ServiceType::Aws))
        .await
        .unwrap();
    ServiceIntegrationRepo::create(&pool, &new_integration(b.id, ServiceType::Mixpanel))
        .await
        .unwrap();
    let mut inactive = new_integration(b.id, ServiceType::Twilio);
    inactive.active = Some(false);
    ServiceIntegrationRepo::create(&pool, &inactive).await.unwrap();

    assert_eq!(ServiceIntegrationRepo::count_by_user(&pool, user.id).await.unwrap(), 3);
    assert_eq!(
        ServiceIntegrationRepo::list_active_for_user(&pool, user.id)
            .await
            .unwrap()
            .len(),
        2
    );

    let only_aws = ServiceIntegrationRepo::list_by_project(&pool, a.id, Some(ServiceType::Aws))
        .await
        .unwrap();
    assert_eq!(only_aws.len(), 1);
    assert_eq!(only_aws[0].service_type, ServiceType::Aws);
    assert!(only_aws[0].active);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_synced_sets_timestamp(pool: PgPool) {
    let user = new_user(&pool, "syncer").await;
    let project = ProjectRepo::create(&pool, user.id, &new_project("P")).await.unwrap();
    let integration =
        ServiceIntegrationRepo::create(&pool, &new_integration(project.id, ServiceType::Stytch))
            .await
            .unwrap();
    assert!(integration.last_synced_at.is_none());

    assert!(ServiceIntegrationRepo::mark_synced(&pool, integration.id).await.unwrap());
    let found = ServiceIntegrationRepo::find_active_for_service(
        &pool,
        project.id,
        ServiceType::Stytch,
    )
    .await
    .unwrap()
    .expect("active integration");
    assert!(found.last_synced_at.is_some());
}

// ---------------------------------------------------------------------------
// Alerts and metrics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_alert_filters_and_status_update(pool: PgPool) {
    let user = new_user(&pool, "alerter").await;
    let project = ProjectRepo::create(&pool, user.id, &new_project("P")).await.unwrap();

    let warn = AlertRepo::create(&pool, &new_alert(project.id, "warn", AlertSeverity::Warning))
        .await
        .unwrap();
    AlertRepo::create(&pool, &new_alert(project.id, "err", AlertSeverity::Error))
        .await
        .unwrap();
    assert_eq!(warn.status, AlertStatus::Active);

    let errors = AlertRepo::list_by_project(
        &pool,
        project.id,
        &AlertFilter {
            severity: Some(AlertSeverity::Error),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "err");

    let resolved = AlertRepo::update(
        &pool,
        warn.id,
        &UpdateAlert {
            status: Some(AlertStatus::Resolved),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(resolved.status, AlertStatus::Resolved);
    assert_eq!(resolved.title, "warn");

    assert_eq!(AlertRepo::count_active_by_project(&pool, project.id).await.unwrap(), 1);
    let recent = AlertRepo::list_active_for_user(&pool, user.id, 10).await.unwrap();
    assert_eq!(recent.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metric_time_window_is_inclusive(pool: PgPool) {
    let user = new_user(&pool, "metrics").await;
    let project = ProjectRepo::create(&pool, user.id, &new_project("P")).await.unwrap();
    let base = Utc::now() - Duration::days(10);

    for day in 0..5 {
        MetricRepo::create(
            &pool,
            &CreateMetric {
                project_id: project.id,
                service_type: ServiceType::Mixpanel,
                metric_type: "activeUsers".to_string(),
                value: json!({ "daily": day }),
                timestamp: Some(base + Duration::days(day)),
            },
        )
        .await
        .unwrap();
    }

    let window = MetricRepo::list_by_project(
        &pool,
        project.id,
        &MetricFilter {
            start: Some(base + Duration::days(1)),
            end: Some(base + Duration::days(3)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(window.len(), 3);
    assert!(window.windows(2).all(|w| w[0].recorded_at <= w[1].recorded_at));

    let wrong_type = MetricRepo::list_by_project(
        &pool,
        project.id,
        &MetricFilter {
            metric_type: Some("other".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(wrong_type.is_empty());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_username_violates_unique_constraint(pool: PgPool) {
    new_user(&pool, "dupe").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "dupe".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "x".to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_users_username"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upgrade_grants_bonus_once(pool: PgPool) {
    let user = new_user(&pool, "upgrader").await;
    assert_eq!(user.subscription_status, SubscriptionStatus::Free);

    let (upgraded, granted) = UserRepo::apply_subscription_change(
        &pool,
        user.id,
        SubscriptionStatus::Premium,
        "cus_1",
        "sub_1",
    )
    .await
    .unwrap()
    .unwrap();
    assert!(granted);
    assert_eq!(upgraded.subscription_status, SubscriptionStatus::Premium);
    assert_eq!(upgraded.available_tokens, PREMIUM_TOKEN_BONUS);

    let (again, granted) = UserRepo::apply_subscription_change(
        &pool,
        user.id,
        SubscriptionStatus::Premium,
        "cus_1",
        "sub_1",
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!granted);
    assert_eq!(again.available_tokens, PREMIUM_TOKEN_BONUS);

    let found = UserRepo::find_by_stripe_customer(&pool, "cus_1").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}
