//! End-to-end tests for the bounded clustering pipeline.

use clubs::{
    Clustering, Dataset, Error, SeedMethod, break_clustering, cluster, cluster_within_radius,
};
use test_case::test_case;

const ALL_METHODS: [SeedMethod; 5] = [
    SeedMethod::Lexical,
    SeedMethod::InwardsOrder,
    SeedMethod::InwardsUpdating,
    SeedMethod::ExclusionOrder,
    SeedMethod::ExclusionUpdating,
];

fn random_dataset(car: usize, dim: usize) -> Dataset<f32> {
    let rows = symagen::random_data::random_tabular_seedable(car, dim, -1.0, 1.0, 42);
    Dataset::from_rows(car, dim, rows.into_iter().flatten().collect())
        .map_or_else(|e| panic!("{e}"), |d| d)
}

/// Every point is assigned and every cluster meets the size bound.
fn assert_bounded(clustering: &Clustering, size_constraint: usize) {
    assert_eq!(clustering.unassigned_count(), 0);
    assert!(clustering.is_sound(true));
    assert!(
        clustering
            .cluster_sizes()
            .iter()
            .all(|&s| s >= size_constraint),
        "cluster sizes {:?} violate the bound {size_constraint}",
        clustering.cluster_sizes()
    );
}

#[test]
fn two_separated_pairs_form_two_clusters() -> Result<(), Error> {
    let data = Dataset::from_rows(4, 1, vec![0.0, 1.0, 10.0, 11.0])?;
    let clustering = cluster(&data, 2, SeedMethod::Lexical, true)?;

    assert_eq!(clustering.num_clusters(), 2);
    assert_bounded(&clustering, 2);
    let labels = clustering.labels();
    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[2], labels[3]);
    assert_ne!(labels[0], labels[2]);
    Ok(())
}

#[test]
fn hexagon_splits_into_adjacent_triples() -> Result<(), Error> {
    let h = 3.0_f64.sqrt() / 2.0;
    #[rustfmt::skip]
    let coords = vec![
         1.0,  0.0,
         0.5,  h,
        -0.5,  h,
        -1.0,  0.0,
        -0.5, -h,
         0.5, -h,
    ];
    let data = Dataset::from_rows(6, 2, coords)?;
    let clustering = cluster(&data, 3, SeedMethod::InwardsUpdating, true)?;

    assert_eq!(clustering.num_clusters(), 2);
    assert_eq!(clustering.cluster_sizes(), vec![3, 3]);

    // An adjacent triple spans at most the next-nearest chord; a triple
    // containing opposite corners would span the full diameter of 2.
    for cl in 0..2 {
        let members = clustering.iter_members(cl).collect::<Vec<_>>();
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[(i + 1)..] {
                let d = data.distance(a as usize, b as usize)?;
                assert!(d < 1.9, "members {a} and {b} are opposite corners");
            }
        }
    }

    // Which triples win depends only on tie resolution, so repeated runs
    // agree exactly.
    let again = cluster(&data, 3, SeedMethod::InwardsUpdating, true)?;
    assert_eq!(clustering, again);
    Ok(())
}

#[test_case(true; "batch")]
#[test_case(false; "seed targets")]
fn collinear_points_collapse_to_one_cluster(batch_assign: bool) -> Result<(), Error> {
    let data = Dataset::from_rows(5, 1, vec![0.0, 1.0, 2.0, 3.0, 4.0])?;
    let clustering = cluster(&data, 3, SeedMethod::ExclusionOrder, batch_assign)?;

    assert_eq!(clustering.num_clusters(), 1);
    assert_bounded(&clustering, 3);
    Ok(())
}

#[test_case(true; "batch")]
#[test_case(false; "seed targets")]
fn breaking_splits_and_absorbs(batch_assign: bool) -> Result<(), Error> {
    let data = Dataset::from_rows(
        8,
        1,
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0],
    )?;
    // A 7-member cluster over the size bound, plus a singleton below it.
    let coarse = Clustering::from_labels(vec![0, 0, 0, 0, 0, 0, 0, 1], 2)?;

    let refined = break_clustering(&coarse, &data, 3, batch_assign)?;
    assert_eq!(refined.num_clusters(), 2);
    assert_bounded(&refined, 3);
    // The singleton's point is absorbed by the cluster holding its nearest
    // neighbor.
    assert_eq!(refined.label_of(7)?, refined.label_of(6)?);
    Ok(())
}

#[test]
fn breaking_keeps_conforming_clusters_whole() -> Result<(), Error> {
    let data = Dataset::from_rows(6, 1, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0])?;
    let coarse = Clustering::from_labels(vec![0, 0, 0, 1, 1, 1], 2)?;

    let refined = break_clustering(&coarse, &data, 3, true)?;
    assert_eq!(refined.num_clusters(), 2);
    assert_eq!(refined.cluster_sizes(), vec![3, 3]);
    Ok(())
}

#[test]
fn radius_limited_points_are_still_placed() -> Result<(), Error> {
    let data = Dataset::from_rows(4, 1, vec![0.0, 1.0, 2.0, 100.0])?;
    let clustering = cluster_within_radius(&data, 2, SeedMethod::Lexical, true, 5.0)?;

    // The outlier cannot anchor a neighborhood but still joins a cluster.
    assert_bounded(&clustering, 2);
    Ok(())
}

#[test]
fn no_seeds_within_radius_is_an_error() {
    let data = Dataset::from_rows(4, 1, vec![0.0, 10.0, 20.0, 30.0])
        .map_or_else(|e| panic!("{e}"), |d| d);
    assert_eq!(
        cluster_within_radius(&data, 2, SeedMethod::Lexical, true, 5.0),
        Err(Error::NoNeighbors)
    );
}

#[test]
fn degenerate_inputs_are_rejected() {
    let data = Dataset::from_rows(4, 1, vec![0.0, 1.0, 2.0, 3.0])
        .map_or_else(|e| panic!("{e}"), |d| d);
    assert!(matches!(
        cluster(&data, 1, SeedMethod::Lexical, true),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        cluster(&data, 5, SeedMethod::Lexical, true),
        Err(Error::InvalidInput(_))
    ));

    let coarse = Clustering::from_labels(vec![0, 0], 1).map_or_else(|e| panic!("{e}"), |c| c);
    assert!(matches!(
        break_clustering(&coarse, &data, 2, true),
        Err(Error::InvalidInput(_))
    ));
}

#[test_case(2; "pairs")]
#[test_case(5; "quintuples")]
fn every_method_meets_the_bound(size_constraint: usize) -> Result<(), Error> {
    let data = random_dataset(200, 4);
    for method in ALL_METHODS {
        for batch_assign in [true, false] {
            let clustering = cluster(&data, size_constraint, method, batch_assign)?;
            assert_bounded(&clustering, size_constraint);
        }
    }
    Ok(())
}

#[test]
fn identical_inputs_give_identical_labelings() -> Result<(), Error> {
    let data = random_dataset(150, 3);
    for method in ALL_METHODS {
        let first = cluster(&data, 4, method, true)?;
        let second = cluster(&data, 4, method, true)?;
        assert_eq!(first, second, "method {method} is not deterministic");
    }
    Ok(())
}

#[test]
fn breaking_a_large_random_clustering_meets_the_bound() -> Result<(), Error> {
    let data = random_dataset(120, 3);
    // One coarse cluster over everything, far above the bound.
    let coarse = Clustering::from_labels(vec![0; 120], 1)?;

    let refined = break_clustering(&coarse, &data, 5, true)?;
    assert_bounded(&refined, 5);
    assert!(refined.num_clusters() > 1);
    Ok(())
}
