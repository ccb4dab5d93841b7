use std::hint::black_box;
use std::time::Instant;

use bonsai_kernel::{Branch, BranchKind, Command, ExpandOptions, LSystem, Turtle, replay};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FORWARD: BranchKind = BranchKind(1);

fn bushy(d: f64) -> LSystem {
    let f = Command::Branch(Branch::new(0.0, d).with_kind(FORWARD));
    let tp = Command::Branch(Branch::turn(22.5));
    let tn = Command::Branch(Branch::turn(-22.5));
    let (push, pop) = (Command::Push, Command::Pop);

    let production = vec![
        f, f, tn, push, tn, f, tp, f, tp, f, pop, tp, push, tp, f, tn, f, tn, f, pop,
    ];
    LSystem::new(vec![f], 4)
        .with_rule(FORWARD, move |_, _| production.clone())
        .expect("fresh system has no rules")
}

fn bench_expand(depth: u32, iterations: u32) {
    let system = bushy(10.0);
    let cursor = Turtle::new(0.0, -250.0, 90.0);
    let options = ExpandOptions::default().with_depth(depth);
    let mut rng = StdRng::seed_from_u64(42);

    let mut len = 0;
    let start = Instant::now();
    for _ in 0..iterations {
        let out = system
            .expand(black_box(&cursor), &options, &mut rng)
            .expect("balanced rules");
        len = out.len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;
    println!(
        "  expand (depth {depth}, {len} commands, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_replay(depth: u32, iterations: u32) {
    let system = bushy(10.0);
    let mut rng = StdRng::seed_from_u64(42);
    let commands = system
        .expand(
            &Turtle::default(),
            &ExpandOptions::default().with_depth(depth),
            &mut rng,
        )
        .expect("balanced rules");

    let start = Instant::now();
    for _ in 0..iterations {
        let mut t = Turtle::default();
        replay(&mut t, black_box(&commands)).expect("balanced rules");
        black_box(t);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;
    println!(
        "  replay ({} commands, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        commands.len()
    );
}

fn main() {
    println!("bonsai-kernel benchmarks");
    for depth in [2, 3, 4] {
        bench_expand(depth, 20);
    }
    bench_replay(4, 50);
}
