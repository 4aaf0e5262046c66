use std::collections::BTreeSet;

use mixwise_mix::{
    CanonicalId, Cocktail, MixResult, Requirement, compute_coverage, unlock_suggestions,
};

fn ids(values: &[&str]) -> BTreeSet<CanonicalId> {
    values.iter().map(|v| CanonicalId::new(*v)).collect()
}

fn cocktail(id: &str, name: &str, requirements: Vec<Requirement>) -> Cocktail {
    Cocktail {
        id: id.into(),
        slug: id.to_owned(),
        name: name.to_owned(),
        requirements,
    }
}

fn sour() -> Cocktail {
    cocktail(
        "sour",
        "Sour",
        vec![
            Requirement::required("A"),
            Requirement::required("B"),
            Requirement::optional("C"),
        ],
    )
}

#[test]
fn optional_ingredients_never_block() {
    for user in [ids(&["A", "B"]), ids(&["A", "B", "C"])] {
        let records = compute_coverage(&[sour()], &user);

        assert_eq!(records.len(), 1);
        assert!(records[0].is_ready);
        assert_eq!(records[0].missing_count, 0);
        assert!(records[0].missing_ingredient_ids.is_empty());
    }
}

#[test]
fn partial_bar_reports_the_missing_ingredient() {
    let records = compute_coverage(&[sour()], &ids(&["A", "C"]));

    assert!(!records[0].is_ready);
    assert_eq!(records[0].missing_count, 1);
    assert_eq!(records[0].missing_ingredient_ids, ids(&["B"]));
}

#[test]
fn cocktails_without_required_ingredients_are_always_ready() {
    let cocktails = [
        cocktail("water", "Water", vec![]),
        cocktail("garnish", "Garnish Only", vec![Requirement::optional("mint")]),
    ];

    for user in [ids(&[]), ids(&["A"])] {
        let records = compute_coverage(&cocktails, &user);
        assert!(records.iter().all(|r| r.is_ready && r.missing_count == 0));
    }
}

#[test]
fn empty_bar_makes_nothing_with_requirements() {
    let cocktails = [sour(), cocktail("water", "Water", vec![])];

    let records = compute_coverage(&cocktails, &ids(&[]));

    assert!(!records[0].is_ready);
    assert_eq!(records[0].missing_count, 2);
    assert!(records[1].is_ready);
}

#[test]
fn records_follow_catalog_order_and_leave_inputs_untouched() {
    let cocktails = vec![
        cocktail("b", "Bramble", vec![Requirement::required("gin")]),
        cocktail("a", "Americano", vec![Requirement::required("campari")]),
    ];
    let before = cocktails.clone();
    let user = ids(&["gin"]);

    let first = compute_coverage(&cocktails, &user);
    let second = compute_coverage(&cocktails, &user);

    assert_eq!(cocktails, before);
    assert_eq!(first, second);
    assert_eq!(first[0].cocktail_id.as_str(), "b");
    assert_eq!(first[1].cocktail_id.as_str(), "a");
}

#[test]
fn mix_sections_are_ranked_deterministically() {
    let cocktails = vec![
        cocktail(
            "negroni",
            "Negroni",
            vec![
                Requirement::required("gin"),
                Requirement::required("campari"),
                Requirement::required("sweet-vermouth"),
            ],
        ),
        cocktail(
            "americano",
            "Americano",
            vec![
                Requirement::required("campari"),
                Requirement::required("sweet-vermouth"),
                Requirement::optional("soda"),
            ],
        ),
        cocktail(
            "gimlet",
            "Gimlet",
            vec![Requirement::required("gin"), Requirement::required("lime")],
        ),
        cocktail(
            "gin-tonic",
            "Gin & Tonic",
            vec![Requirement::required("gin"), Requirement::required("tonic")],
        ),
        cocktail("gin-neat", "Gin Neat", vec![Requirement::required("gin")]),
    ];
    let user = ids(&["gin", "sweet-vermouth"]);

    let records = compute_coverage(&cocktails, &user);
    let result = MixResult::from_records(records.clone(), 2);

    let ready: Vec<_> = result.ready.iter().map(|r| r.cocktail_id.as_str()).collect();
    let almost: Vec<_> = result
        .almost_there
        .iter()
        .map(|r| r.cocktail_id.as_str())
        .collect();

    assert_eq!(ready, vec!["gin-neat"]);
    assert_eq!(almost, vec!["americano", "gimlet", "gin-tonic", "negroni"]);

    let suggestions = unlock_suggestions(&records);
    assert_eq!(suggestions[0].ingredient_id.as_str(), "campari");
    assert_eq!(suggestions[0].unlocks, 2);
}
