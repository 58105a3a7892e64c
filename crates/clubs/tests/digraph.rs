//! Structural tests for neighbor digraphs and the operations on them.

use clubs::{Dataset, Digraph, Error, Vid, digraph::ops, knn_graph};

fn random_dataset(car: usize, dim: usize) -> Dataset<f32> {
    let rows = symagen::random_data::random_tabular_seedable(car, dim, -1.0, 1.0, 7);
    Dataset::from_rows(car, dim, rows.into_iter().flatten().collect())
        .map_or_else(|e| panic!("{e}"), |d| d)
}

fn sorted_rows(g: &Digraph) -> Vec<Vec<Vid>> {
    (0..g.vertex_count())
        .map(|v| {
            let mut row = g.successors(v).to_vec();
            row.sort_unstable();
            row
        })
        .collect()
}

#[test]
fn nng_rows_are_the_k_nearest() -> Result<(), Error> {
    let data = random_dataset(80, 3);
    let k = 4;
    let g = knn_graph(&data, k, None)?;

    for v in 0..data.row_count() {
        let mut others = (0..data.row_count())
            .filter(|&u| u != v)
            .map(|u| data.distance(v, u).map(|d| (d, u)))
            .collect::<Result<Vec<_>, _>>()?;
        others.sort_by(|a, b| a.partial_cmp(b).map_or(core::cmp::Ordering::Equal, |o| o));

        let expected = others
            .iter()
            .take(k)
            .map(|&(_, u)| u)
            .collect::<Vec<_>>();
        let actual = g
            .successors(v)
            .iter()
            .map(|&w| w as usize)
            .collect::<Vec<_>>();
        assert_eq!(actual, expected, "wrong neighbors for vertex {v}");
    }
    Ok(())
}

#[test]
fn transposing_twice_restores_the_arc_sets() -> Result<(), Error> {
    let data = random_dataset(60, 2);
    let g = knn_graph(&data, 3, None)?;

    let gtt = ops::transpose(&ops::transpose(&g)?)?;
    assert_eq!(sorted_rows(&gtt), sorted_rows(&g));
    Ok(())
}

#[test]
fn derived_graphs_are_sound_and_deduplicated() -> Result<(), Error> {
    let data = random_dataset(50, 2);
    let g = knn_graph(&data, 3, None)?;
    assert!(g.is_sound());

    let gt = ops::transpose(&g)?;
    assert!(gt.is_sound());
    assert_eq!(gt.arc_count(), g.arc_count());

    let overlap = ops::adjacency_product(&g, &gt, true, false)?;
    assert!(overlap.is_sound());

    let keep = (0..g.vertex_count())
        .map(|v| g.out_degree(v) > 0)
        .collect::<Vec<_>>();
    let union = ops::union_and_delete(&[&g, &overlap], &keep)?;
    assert!(union.is_sound());

    for derived in [&overlap, &union] {
        for row in sorted_rows(derived) {
            let mut deduped = row.clone();
            deduped.dedup();
            assert_eq!(deduped, row, "a derived row holds duplicate arcs");
        }
    }
    Ok(())
}

#[test]
fn overlap_graph_connects_intersecting_neighborhoods() -> Result<(), Error> {
    let data = random_dataset(40, 2);
    let g = knn_graph(&data, 2, None)?;

    let gt = ops::transpose(&g)?;
    let overlap = ops::adjacency_product(&g, &gt, true, false)?;
    let keep = vec![true; g.vertex_count()];
    let e = ops::union_and_delete(&[&g, &overlap], &keep)?;

    // Closed neighborhoods, as sorted sets.
    let closed = (0..g.vertex_count())
        .map(|v| {
            let mut set = g.successors(v).to_vec();
            set.push(v as Vid);
            set.sort_unstable();
            set
        })
        .collect::<Vec<_>>();

    for u in 0..g.vertex_count() {
        for w in 0..g.vertex_count() {
            if u == w {
                continue;
            }
            let intersects = closed[u].iter().any(|x| closed[w].binary_search(x).is_ok());
            let has_arc = e.successors(u).contains(&(w as Vid));
            assert_eq!(
                has_arc, intersects,
                "overlap arc {u} -> {w} disagrees with the neighborhoods"
            );
        }
    }
    Ok(())
}
