use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_solver::cells::GridCoordinate;
use maze_solver::generators;
use maze_solver::grid::Grid;
use maze_solver::observers::NullObserver;
use maze_solver::pathing;
use maze_solver::units::{ColumnsCount, RowsCount};
use rand::{rngs::SmallRng, SeedableRng};

fn large_maze() -> Grid {
    let mut g = Grid::new(ColumnsCount(350), RowsCount(350)).unwrap();
    generators::generate(&mut g, &mut SmallRng::seed_from_u64(350), &mut NullObserver);
    g
}

fn bench_depth_first_search(c: &mut Criterion) {
    c.bench_function("depth_first_search", |b| {
        let mut g = large_maze();
        let (start, end) = (g.entrance(), g.exit());
        b.iter(|| pathing::depth_first_search(&mut g, start, end, &mut NullObserver))
    });
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        b.iter(|| pathing::Distances::for_grid(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = pathing::Distances::for_grid(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = pathing::Distances::for_grid(&g, start_coord).unwrap();
        let end_coord = GridCoordinate::new(0, 0);
        b.iter(|| pathing::shortest_path(&g, &distances, end_coord))
    });
}

criterion_group!(benches,
    bench_depth_first_search,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path
);
criterion_main!(benches);
