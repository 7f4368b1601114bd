// Query engine behavior over the sample catalog.
#[path = "support/common.rs"]
mod common;

use hwcatalog::{Criteria, Feature, ItemRecord, SpecRecord, query};

use common::{ids, sample_items};

#[test]
fn empty_criteria_returns_everything_in_canonical_order() {
    let items = sample_items();
    let mut shuffled = items.clone();
    shuffled.reverse();
    let results = query(&shuffled, &Criteria::new());
    assert_eq!(results, items);
    assert_eq!(
        ids(&results),
        vec![
            "Dell_Latitude 5420",
            "Dell_OptiPlex 7010",
            "Dell_Precision 5680",
            "HP_EliteBook 840 G10",
            "Lenovo_ThinkPad T14s Gen 4",
        ]
    );
}

#[test]
fn text_search_matches_gpu_case_insensitively() {
    let items = sample_items();
    assert_eq!(
        ids(&query(&items, &Criteria::new().search("rtx"))),
        vec!["Dell_Precision 5680"]
    );
    assert_eq!(
        ids(&query(&items, &Criteria::new().search("adlx65"))),
        vec!["Lenovo_ThinkPad T14s Gen 4"]
    );
    assert!(query(&items, &Criteria::new().search("macbook")).is_empty());
}

#[test]
fn wwan_and_esim_flags_filter_independently() {
    let item = ItemRecord::new(
        "Dell",
        "5420",
        SpecRecord {
            has_wwan: true,
            has_esim: false,
            ..SpecRecord::default()
        },
    );
    let items = vec![item];
    assert_eq!(query(&items, &Criteria::new().feature(Feature::Wwan)).len(), 1);
    assert!(query(&items, &Criteria::new().feature(Feature::Esim)).is_empty());
}

#[test]
fn brand_and_type_sets_combine_with_and() {
    let laptops: Vec<ItemRecord> = ["5420", "7420"]
        .iter()
        .map(|model| {
            ItemRecord::new(
                "Dell",
                *model,
                SpecRecord {
                    device_type: Some("Laptop".to_string()),
                    ..SpecRecord::default()
                },
            )
        })
        .collect();
    let criteria = Criteria::new().brand("Dell").device_type("Desktop");
    assert!(query(&laptops, &criteria).is_empty());

    let items = sample_items();
    let criteria = Criteria::new()
        .brand("Dell")
        .brand("Lenovo")
        .device_type("Laptop");
    assert_eq!(
        ids(&query(&items, &criteria)),
        vec!["Dell_Latitude 5420", "Lenovo_ThinkPad T14s Gen 4"]
    );
}

#[test]
fn dedicated_gpu_and_upgradable_ram_features() {
    let items = sample_items();
    assert_eq!(
        ids(&query(&items, &Criteria::new().feature(Feature::DedicatedGpu))),
        vec!["Dell_OptiPlex 7010", "Dell_Precision 5680"]
    );
    assert_eq!(
        ids(&query(&items, &Criteria::new().feature(Feature::UpgradableRam))),
        vec![
            "Dell_Latitude 5420",
            "Dell_OptiPlex 7010",
            "HP_EliteBook 840 G10",
            "Lenovo_ThinkPad T14s Gen 4",
        ]
    );
}

#[test]
fn query_is_idempotent_and_composes() {
    let items = sample_items();
    let by_brand = Criteria::new().brand("Dell").brand("Lenovo");
    let by_feature = Criteria::new().feature(Feature::Wwan).search("intel");
    let combined = Criteria::new()
        .brand("Dell")
        .brand("Lenovo")
        .feature(Feature::Wwan)
        .search("intel");

    let once = query(&items, &by_brand);
    assert_eq!(query(&once, &by_brand), once);
    assert_eq!(
        query(&query(&items, &by_brand), &by_feature),
        query(&items, &combined)
    );
    assert_eq!(ids(&query(&items, &combined)), vec!["Dell_Latitude 5420"]);
}

#[test]
fn results_are_a_subset_of_input() {
    let items = sample_items();
    let criteria_list = [
        Criteria::new(),
        Criteria::new().search("core"),
        Criteria::new().feature(Feature::Esim),
        Criteria::new().device_type("Desktop").feature(Feature::DedicatedGpu),
        Criteria::new().brand("Apple"),
    ];
    for criteria in criteria_list {
        let results = query(&items, &criteria);
        assert!(results.len() <= items.len());
        for item in &results {
            assert!(items.contains(item), "fabricated item {}", item.id());
        }
        let mut seen = ids(&results);
        seen.dedup();
        assert_eq!(seen.len(), results.len());
    }
}
