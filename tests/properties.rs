//! Property tests for classification and subset aggregation.

use de_upset::prelude::*;
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn gene_id() -> impl Strategy<Value = String> {
    "g[0-9]{1,2}"
}

fn records() -> impl Strategy<Value = Vec<(String, f64)>> {
    vec((gene_id(), -5.0f64..5.0), 0..40)
}

fn table_from(records: &[(String, f64)]) -> RecordTable {
    let mut table = RecordTable::new("cmp.tsv");
    for (id, fc) in records {
        table.insert(id.clone(), *fc);
    }
    table
}

proptest! {
    #[test]
    fn up_and_down_partition_distinct_ids(records in records(), threshold in -1.0f64..1.0) {
        let table = table_from(&records);
        let classified = classify_records(&table, "cmp", threshold);

        let distinct: BTreeSet<String> = records.iter().map(|(id, _)| id.clone()).collect();
        let union: BTreeSet<String> = classified
            .upregulated
            .members
            .union(&classified.downregulated.members)
            .cloned()
            .collect();
        prop_assert_eq!(union, distinct);
        prop_assert!(classified.upregulated.members.is_disjoint(&classified.downregulated.members));
    }

    #[test]
    fn last_occurrence_decides_class(records in records()) {
        let table = table_from(&records);
        let classified = classify_records(&table, "cmp", 0.0);

        for (id, _) in &records {
            let last = records.iter().rev().find(|(other, _)| other == id).map(|(_, fc)| *fc).unwrap();
            prop_assert_eq!(classified.upregulated.contains(id), last > 0.0);
        }
    }

    #[test]
    fn threshold_value_is_downregulated(threshold in -10.0f64..10.0) {
        let mut table = RecordTable::new("cmp.tsv");
        table.insert("at".to_string(), threshold);
        let classified = classify_records(&table, "cmp", threshold);
        prop_assert!(classified.downregulated.contains("at"));
        prop_assert!(!classified.upregulated.contains("at"));
    }

    #[test]
    fn subset_counts_sum_to_elements(sets in vec(btree_set(gene_id(), 0..20), 0..6)) {
        let collection = SetCollection::from_sets(
            sets.into_iter()
                .enumerate()
                .map(|(i, members)| NamedSet::from_members(format!("set{}", i), members)),
        )
        .unwrap();
        let matrix = MembershipMatrix::from_sets(&collection);
        let counts = aggregate_subsets(&matrix);

        prop_assert_eq!(counts.total(), matrix.n_elements());
        prop_assert_eq!(matrix.n_elements(), collection.union().len());
        for (pattern, count) in counts.iter() {
            prop_assert!(count > 0);
            prop_assert!(pattern.degree() > 0);
            prop_assert_eq!(matrix.members_of(pattern.flags()).len(), count);
        }
    }
}
