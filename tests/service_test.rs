mod common;

use assert2::check;
use chrono::{DateTime, TimeDelta, Utc};
use common::{CatalogDir, PluginBuilder, catalog_dir, now, varied_catalog};
use plugin_rank::config::RankingConfig;
use plugin_rank::{
    Catalog, InMemoryCatalog, JsonFileCatalog, PluginRecord, PluginStatus, RankingService,
    rank_popular, rank_trending,
};
use rstest::rstest;
use std::sync::Arc;

fn ids(plugins: &[PluginRecord]) -> Vec<&str> {
    plugins.iter().map(|p| p.id.as_str()).collect()
}

// --- Empty and failing catalogs ---

#[rstest]
#[tokio::test]
async fn empty_catalog_yields_empty_rankings(now: DateTime<Utc>) {
    let service = RankingService::new(Arc::new(InMemoryCatalog::new(vec![])));
    let request = service.request_at(now);

    check!(request.get_popular_plugins(None).await.is_empty());
    check!(request.get_trending_plugins(None).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn catalog_outage_yields_empty_rankings(now: DateTime<Utc>) {
    let catalog = Arc::new(InMemoryCatalog::unavailable("database is down"));
    let service = RankingService::new(catalog.clone());
    let request = service.request_at(now);

    check!(request.get_popular_plugins(Some(5)).await.is_empty());
    check!(request.get_trending_plugins(Some(5)).await.is_empty());
    check!(catalog.query_count() == 1);
}

#[rstest]
#[tokio::test]
async fn missing_catalog_file_yields_empty_rankings(catalog_dir: CatalogDir) {
    let catalog = Arc::new(JsonFileCatalog::new(catalog_dir.path().join("missing.json")));
    let request = RankingService::new(catalog).request();

    check!(request.get_popular_plugins(None).await.is_empty());
}

// --- Request scoping ---

#[rstest]
#[tokio::test]
async fn one_fetch_per_request(now: DateTime<Utc>) {
    let catalog = Arc::new(InMemoryCatalog::new(varied_catalog(20)));
    let service = RankingService::new(catalog.clone());

    let request = service.request_at(now);
    request.get_popular_plugins(None).await;
    request.get_trending_plugins(None).await;
    request.get_popular_plugins(Some(3)).await;
    check!(catalog.query_count() == 1);

    service.request_at(now).get_trending_plugins(None).await;
    check!(catalog.query_count() == 2);
}

#[rstest]
#[tokio::test]
async fn concurrent_requests_do_not_share_results(now: DateTime<Utc>) {
    let catalog = Arc::new(InMemoryCatalog::new(varied_catalog(20)));
    let service = RankingService::new(catalog.clone());

    let first = service.request_at(now);
    let second = service.request_at(now);
    let (a, b) = tokio::join!(first.get_popular_plugins(None), second.get_popular_plugins(None));

    check!(a == b);
    check!(catalog.query_count() == 2);
}

// --- Entry points ---

#[rstest]
#[tokio::test]
async fn entry_points_match_rankers(now: DateTime<Utc>) {
    let plugins = varied_catalog(30);
    let request =
        RankingService::new(Arc::new(InMemoryCatalog::new(plugins.clone()))).request_at(now);

    check!(request.get_popular_plugins(None).await == rank_popular(&plugins, 8, now));
    check!(request.get_trending_plugins(Some(12)).await == rank_trending(&plugins, 12, now));
}

#[rstest]
#[tokio::test]
async fn default_limit_is_eight(now: DateTime<Utc>) {
    let request =
        RankingService::new(Arc::new(InMemoryCatalog::new(varied_catalog(50)))).request_at(now);

    check!(request.get_popular_plugins(None).await.len() == 8);
    check!(request.get_trending_plugins(None).await.len() == 8);
}

#[rstest]
#[tokio::test]
async fn only_published_plugins_are_ranked(now: DateTime<Utc>) {
    let mut draft = PluginBuilder::new("draft").views(1_000_000).build();
    draft.status = PluginStatus::Draft;
    let plugins = vec![draft, PluginBuilder::new("live").views(1).build()];
    let request = RankingService::new(Arc::new(InMemoryCatalog::new(plugins))).request_at(now);

    check!(ids(&request.get_popular_plugins(None).await) == ["live"]);
}

#[rstest]
#[tokio::test]
async fn at_most_one_hundred_candidates(now: DateTime<Utc>) {
    // The best plugins sit past the first page and are never fetched.
    let mut plugins = varied_catalog(100);
    plugins.push(PluginBuilder::new("late-star").views(1_000_000).build());
    let request = RankingService::new(Arc::new(InMemoryCatalog::new(plugins))).request_at(now);

    let ranked = request.get_popular_plugins(Some(1000)).await;
    check!(ranked.len() == 100);
    check!(!ranked.iter().any(|p| p.id == "late-star"));
}

#[rstest]
#[tokio::test]
async fn scores_are_descending(now: DateTime<Utc>) {
    let request =
        RankingService::new(Arc::new(InMemoryCatalog::new(varied_catalog(40)))).request_at(now);

    let popular = request.popular_scored(Some(40)).await;
    let trending = request.trending_scored(Some(40)).await;
    check!(popular.windows(2).all(|w| w[0].score >= w[1].score));
    check!(trending.windows(2).all(|w| w[0].score >= w[1].score));
}

// --- Configuration ---

#[rstest]
#[tokio::test]
async fn configured_profiles_are_used(now: DateTime<Utc>) {
    let config = RankingConfig::parse(
        r#"
        default_limit = 1

        [popular]
        view_weight = 0.0
        stars_weight = 0.0
        forks_weight = 10.0
        upvotes_weight = 0.0
        comments_weight = 0.0
        age_weight = 0.0
        update_recency_weight = 0.0

        [trending_bonus]
        update_tiers = []
        "#,
    )
    .unwrap();

    let plugins = vec![
        PluginBuilder::new("viewed").views(500).build(),
        PluginBuilder::new("forked").forks(3).updated(TimeDelta::days(1)).build(),
    ];
    let catalog = Arc::new(InMemoryCatalog::new(plugins));
    let request = RankingService::from_config(catalog, &config).request_at(now);

    check!(ids(&request.get_popular_plugins(None).await) == ["forked"]);

    let trending = request.trending_scored(Some(2)).await;
    check!(trending[0].plugin.id == "viewed");
    let forked = &trending[1];
    // 3 forks + update term, no update tier configured
    check!((forked.score - (3.0 + 3.0 / std::f64::consts::LN_2)).abs() < 1e-9);
}

#[rstest]
#[tokio::test]
async fn configured_page_size_caps_candidates(now: DateTime<Utc>) {
    let config = RankingConfig {
        page_size: 5,
        ..RankingConfig::default()
    };
    let catalog = Arc::new(InMemoryCatalog::new(varied_catalog(30)));
    let request = RankingService::from_config(catalog, &config).request_at(now);

    check!(request.get_popular_plugins(Some(100)).await.len() == 5);
}

// --- JSON catalog end to end ---

#[rstest]
#[tokio::test]
async fn ranks_json_export(catalog_dir: CatalogDir, now: DateTime<Utc>) {
    let export = serde_json::json!({
        "docs": [
            {
                "id": 1,
                "name": "Old Reliable",
                "views": 900,
                "createdAt": (now - TimeDelta::days(1000)).to_rfc3339(),
                "githubData": { "stars": 120, "forks": 30 },
                "rating": { "upvotes": 40 },
                "status": "published"
            },
            {
                "id": 2,
                "name": "Fresh Drop",
                "views": 400,
                "createdAt": (now - TimeDelta::days(3)).to_rfc3339(),
                "githubData": {
                    "stars": 15,
                    "lastUpdated": (now - TimeDelta::days(1)).to_rfc3339()
                },
                "rating": { "upvotes": 6 },
                "comments": [
                    { "createdAt": (now - TimeDelta::days(1)).to_rfc3339() },
                    { "createdAt": (now - TimeDelta::days(2)).to_rfc3339() }
                ],
                "status": "published"
            },
            { "id": 3, "name": "Unreleased", "views": 99999, "status": "draft" },
            {
                "id": 4,
                "name": "Unrated",
                "githubData": "6650a1b2",
                "rating": null,
                "comments": null,
                "status": "published"
            }
        ],
        "totalDocs": 4,
        "limit": 100
    });
    let path = catalog_dir.write("plugins.json", &export.to_string());
    let catalog: Arc<dyn Catalog> = Arc::new(JsonFileCatalog::new(path));
    let request = RankingService::new(catalog).request_at(now);

    let popular = request.get_popular_plugins(None).await;
    check!(ids(&popular) == ["1", "2", "4"]);

    let trending = request.trending_scored(None).await;
    check!(trending.len() == 3);
    check!(trending.last().unwrap().plugin.display_name() == "Unrated");
    check!(trending.last().unwrap().score == 0.0);
}

#[rstest]
#[tokio::test]
async fn malformed_fields_score_as_zero(catalog_dir: CatalogDir, now: DateTime<Utc>) {
    let export = serde_json::json!([
        { "id": "good", "views": 5, "status": "published" },
        {
            "id": "bad-stars",
            "views": 900,
            "githubData": { "stars": "many" },
            "status": "published"
        },
        { "id": "bad-date", "views": 800, "createdAt": "yesterday", "status": "published" },
        { "id": "neg-views", "views": -1, "rating": { "upvotes": 100 }, "status": "published" }
    ]);
    let path = catalog_dir.write("plugins.json", &export.to_string());
    let request = RankingService::new(Arc::new(JsonFileCatalog::new(path))).request_at(now);

    let popular = request.popular_scored(None).await;
    let ranked: Vec<_> = popular.iter().map(|s| s.plugin.id.as_str()).collect();
    check!(ranked == ["bad-stars", "bad-date", "neg-views", "good"]);
    check!(popular[0].score == 900.0);
    check!(popular[1].score == 800.0);
    check!(popular[2].score == 300.0);
    check!(request.get_trending_plugins(None).await.len() == 4);
}
