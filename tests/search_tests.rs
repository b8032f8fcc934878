// Copyright 2025 Cowboy AI, LLC.

use std::sync::Arc;

use cim_frontend::{
    Condition, Config, Context, Filter, Frontend, FrontendError, FrontendResult, Manager,
    Operator, Registry, SearchResult, Slice, Sort, SortDirection,
};
use mockall::{mock, predicate::function};
use pretty_assertions::assert_eq;
use serde_json::json;

mock! {
    pub ShopManager {}

    impl Manager for ShopManager {
        fn filter(&self) -> Filter;
        fn search(&self, filter: &Filter) -> FrontendResult<SearchResult>;
    }
}

fn enabled() -> Condition {
    Condition::compare(Operator::Equal, "product.status", 1)
}

fn frontend() -> Frontend {
    let registry = Registry::builder()
        .with_builtin_decorators()
        .and_then(|b| b.add_standard("product"))
        .unwrap()
        .build();
    Frontend::new(registry)
}

#[test]
fn search_folds_state_into_manager_filter() {
    let mut manager = MockShopManager::new();
    manager
        .expect_filter()
        .times(1)
        .returning(|| Filter::with_base(enabled()));
    manager
        .expect_search()
        .with(function(|filter: &Filter| {
            filter.predicate()
                == Some(Condition::And(vec![
                    enabled(),
                    Condition::compare(Operator::StartsWith, "product.code", "dem"),
                ]))
                && filter.sortations
                    == vec![
                        Sort::new(SortDirection::Descending, "product.position"),
                        Sort::new(SortDirection::Ascending, "product.code"),
                    ]
                && filter.slice == Slice { start: 10, size: 20 }
        }))
        .times(1)
        .returning(|_| Ok(SearchResult::new(vec![json!({"product.code": "demo"})], Some(11))));

    let ctx = Context::new(Config::new()).with_manager("product", Arc::new(manager));
    let mut handle = frontend().create(&ctx, "product", None).unwrap();
    handle
        .compare("=~", "product.code", "dem")
        .and_then(|h| h.sort(Some("-position,code")))
        .and_then(|h| h.slice(10, 20))
        .unwrap();

    let found = handle.search().unwrap();

    assert_eq!(found.items.len(), 1);
    assert!(found.has_more());
}

#[test]
fn search_without_expressions_uses_base_only() {
    let mut manager = MockShopManager::new();
    manager
        .expect_filter()
        .returning(|| Filter::with_base(enabled()));
    manager
        .expect_search()
        .with(function(|filter: &Filter| {
            filter.predicate() == Some(enabled())
                && filter.locale.is_none()
                && filter.sortations.is_empty()
                && filter.slice == Slice::default()
        }))
        .returning(|_| Ok(SearchResult::default()));

    let ctx = Context::new(Config::new()).with_manager("product", Arc::new(manager));
    let handle = frontend().create(&ctx, "product", None).unwrap();

    assert_eq!(handle.search().unwrap(), SearchResult::default());
}

#[test]
fn limit_decorator_clamps_requested_slice() {
    let mut manager = MockShopManager::new();
    manager.expect_filter().returning(Filter::default);
    manager
        .expect_search()
        .with(function(|filter: &Filter| filter.slice == Slice { start: 0, size: 50 }))
        .times(1)
        .returning(|_| Ok(SearchResult::default()));

    let config = Config::new()
        .with("controller/frontend/common/decorators/default", json!(["Limit", "Log"]))
        .with("controller/frontend/common/decorators/limit/max", 50);
    let ctx = Context::new(config).with_manager("product", Arc::new(manager));

    let mut handle = frontend().create(&ctx, "product", None).unwrap();
    handle.slice(0, 500).unwrap();
    handle.search().unwrap();
}

#[test]
fn parsed_conditions_reach_the_manager() {
    let mut manager = MockShopManager::new();
    manager.expect_filter().returning(Filter::default);
    manager
        .expect_search()
        .with(function(|filter: &Filter| {
            filter.predicate()
                == Some(Condition::Or(vec![
                    Condition::compare(Operator::Equal, "product.type", "default"),
                    Condition::not(Condition::compare(Operator::Less, "product.price", 10)),
                ]))
        }))
        .times(1)
        .returning(|_| Ok(SearchResult::default()));

    let ctx = Context::new(Config::new()).with_manager("product", Arc::new(manager));
    let mut handle = frontend().create(&ctx, "product", None).unwrap();
    handle
        .parse(&json!({
            "||": [
                {"==": {"product.type": "default"}},
                {"!": {"<": {"product.price": 10}}}
            ]
        }))
        .unwrap();

    handle.search().unwrap();
}

#[test]
fn request_locale_reaches_the_manager() {
    let mut manager = MockShopManager::new();
    manager.expect_filter().returning(Filter::default);
    manager
        .expect_search()
        .with(function(|filter: &Filter| filter.locale.as_deref() == Some("de")))
        .times(1)
        .returning(|_| Ok(SearchResult::default()));

    let ctx = Context::new(Config::new())
        .with_locale("de")
        .with_manager("product", Arc::new(manager));
    let handle = frontend().create(&ctx, "product", None).unwrap();

    assert_eq!(handle.context().locale(), Some("de"));
    handle.search().unwrap();
}

#[test]
fn missing_manager_is_reported() {
    let ctx = Context::new(Config::new());
    let handle = frontend().create(&ctx, "product", None).unwrap();

    let err = handle.search().unwrap_err();

    assert!(matches!(err, FrontendError::Manager { ref domain, .. } if domain == "product"));
}

#[test]
fn manager_errors_propagate() {
    let mut manager = MockShopManager::new();
    manager.expect_filter().returning(Filter::default);
    manager
        .expect_search()
        .returning(|_| Err(FrontendError::controller("index unavailable")));

    let ctx = Context::new(Config::new()).with_manager("product", Arc::new(manager));
    let handle = frontend().create(&ctx, "product", None).unwrap();

    assert!(matches!(
        handle.search(),
        Err(FrontendError::Controller { ref message, .. }) if message == "index unavailable"
    ));
}
