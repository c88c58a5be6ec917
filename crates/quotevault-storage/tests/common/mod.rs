//! Behaviour every repository backend must share.
//!
//! Each function takes a freshly created, empty repository.

#![allow(dead_code)]

use jiff::Timestamp;
use quotevault_core::{NewQuote, Quote, QuoteId};
use quotevault_storage::{Repository, StorageError};
use std::collections::HashSet;

pub fn new_quote(text: &str, author: &str, category: &str) -> NewQuote {
    NewQuote::new(text, author, category).expect("valid quote")
}

pub async fn seed<R: Repository>(repo: &R, category: &str, n: usize) -> Vec<Quote> {
    let mut created = Vec::with_capacity(n);
    for i in 0..n {
        let quote = new_quote(
            &format!("Quote number {i} filed under {category}"),
            &format!("Author {i}"),
            category,
        );
        created.push(repo.create(quote).await.unwrap());
    }
    created
}

pub async fn create_then_get_round_trips<R: Repository>(repo: &R) {
    let before = Timestamp::now().as_microsecond();

    let created = repo
        .create(new_quote(
            "  The journey of a thousand miles begins with one step.  ",
            "Lao Tzu",
            "wisdom",
        ))
        .await
        .unwrap();

    assert!(created.id > 0);
    assert!(created.created_at.as_microsecond() >= before);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(
        created.text,
        "The journey of a thousand miles begins with one step."
    );

    let fetched = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

pub async fn get_missing_is_not_found<R: Repository>(repo: &R) {
    let err = repo.get_by_id(424_242).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)), "{err:?}");
}

pub async fn ids_are_unique<R: Repository>(repo: &R) {
    let created = seed(repo, "test", 5).await;
    let ids: HashSet<QuoteId> = created.iter().map(|q| q.id).collect();
    assert_eq!(ids.len(), 5);
}

pub async fn listing_is_newest_first_and_paginates<R: Repository>(repo: &R) {
    let created = seed(repo, "test", 15).await;
    let mut expected: Vec<QuoteId> = created.iter().map(|q| q.id).collect();
    expected.reverse();

    let first = repo.get_all(None, 10, 0).await.unwrap();
    let second = repo.get_all(None, 10, 10).await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 5);
    assert_eq!(repo.get_count(None).await.unwrap(), 15);

    let listed: Vec<QuoteId> = first.iter().chain(second.iter()).map(|q| q.id).collect();
    assert_eq!(listed, expected);

    assert!(repo.get_all(None, 10, 20).await.unwrap().is_empty());
}

pub async fn category_filter_is_exact<R: Repository>(repo: &R) {
    seed(repo, "motivation", 3).await;
    seed(repo, "humor", 2).await;

    let humor = repo.get_all(Some("humor"), 10, 0).await.unwrap();
    assert_eq!(humor.len(), 2);
    assert!(humor.iter().all(|q| q.category == "humor"));

    assert_eq!(repo.get_count(Some("motivation")).await.unwrap(), 3);
    assert_eq!(repo.get_count(Some("Motivation")).await.unwrap(), 0);
    assert_eq!(repo.get_count(Some("motiv")).await.unwrap(), 0);
    assert_eq!(repo.get_count(None).await.unwrap(), 5);
}

pub async fn random_stays_in_category<R: Repository>(repo: &R) {
    seed(repo, "humor", 4).await;
    seed(repo, "wisdom", 4).await;

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let quote = repo.get_random(Some("humor")).await.unwrap();
        assert_eq!(quote.category, "humor");
        seen.insert(quote.id);
    }
    assert!(seen.len() > 1, "sampling returned a single id");

    let err = repo
        .get_random(Some("nonexistent-category"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)), "{err:?}");
}

pub async fn random_on_empty_store_is_not_found<R: Repository>(repo: &R) {
    let err = repo.get_random(None).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)), "{err:?}");
}

pub async fn categories_are_sorted_and_distinct<R: Repository>(repo: &R) {
    seed(repo, "motivation", 2).await;
    seed(repo, "humor", 1).await;

    let categories = repo.get_categories().await.unwrap();
    assert_eq!(categories, vec!["humor", "motivation"]);
}

pub async fn search_matches_any_field_case_insensitively<R: Repository>(repo: &R) {
    repo.create(new_quote(
        "Imagination is more important than knowledge.",
        "Albert Einstein",
        "science",
    ))
    .await
    .unwrap();
    repo.create(new_quote(
        "The unexamined life is not worth living.",
        "Socrates",
        "philosophy",
    ))
    .await
    .unwrap();
    repo.create(new_quote(
        "Discount of 100% on all wisdom today.",
        "A shopkeeper",
        "humor",
    ))
    .await
    .unwrap();

    assert_eq!(repo.search("KNOWLEDGE", 10, 0).await.unwrap().len(), 1);
    assert_eq!(repo.search("einstein", 10, 0).await.unwrap().len(), 1);
    assert_eq!(repo.search("Philo", 10, 0).await.unwrap().len(), 1);
    assert_eq!(repo.search_count("IN").await.unwrap(), 2);

    // wildcards are matched literally
    assert_eq!(repo.search("100%", 10, 0).await.unwrap().len(), 1);
    assert!(repo.search("1_0", 10, 0).await.unwrap().is_empty());

    assert!(repo.search("quantum", 10, 0).await.unwrap().is_empty());
    assert_eq!(repo.search_count("quantum").await.unwrap(), 0);
}

pub async fn search_folds_non_ascii_case<R: Repository>(repo: &R) {
    repo.create(new_quote("Ça ne fait rien, mon ami.", "Émile Zola", "french"))
        .await
        .unwrap();
    repo.create(new_quote("ΟΛΑ ΡΕΙ ΚΑΙ ΤΙΠΟΤΑ ΔΕΝ ΜΕΝΕΙ", "Ηράκλειτος", "philosophy"))
        .await
        .unwrap();

    for term in ["ÇA", "ça", "émile", "ÉMILE", "Émile Zola"] {
        assert_eq!(repo.search_count(term).await.unwrap(), 1, "term {term:?}");
    }
    assert_eq!(repo.search("ολα ρει", 10, 0).await.unwrap().len(), 1);
    assert_eq!(repo.search("ηράκλειτος", 10, 0).await.unwrap().len(), 1);

    // a match never spans two fields
    assert_eq!(repo.search_count("ami.émile").await.unwrap(), 0);
}

pub async fn blank_search_returns_everything<R: Repository>(repo: &R) {
    seed(repo, "test", 3).await;

    assert_eq!(repo.search("", 10, 0).await.unwrap().len(), 3);
    assert_eq!(repo.search("   ", 2, 0).await.unwrap().len(), 2);
    assert_eq!(repo.search_count(" ").await.unwrap(), 3);
}

pub async fn ping_succeeds<R: Repository>(repo: &R) {
    repo.ping().await.unwrap();
}
