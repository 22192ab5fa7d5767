//! Benchmarks for IPL Insights loading and leaderboards
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ipl_insights::data::DatasetLoader;
use ipl_insights::query::{player_report, squad_for, Board, PlayerQuery};
use std::fmt::Write;

const TEAMS: [&str; 4] = [
    "Mumbai Indians",
    "Chennai Super Kings",
    "Delhi Daredevils",
    "Kolkata Knight Riders",
];

/// Synthetic tables: `matches` games of two 120-ball innings each
fn synthetic_csv(matches: usize) -> (String, String) {
    let mut match_csv = String::from("id,season,team1,team2,winner,player_of_match\n");
    let mut delivery_csv = String::from(
        "match_id,over,ball,batting_team,bowling_team,batter,non_striker,bowler,batsman_runs,total_runs,is_wicket,dismissal_kind,player_dismissed\n",
    );

    for id in 0..matches {
        let season = 2008 + (id % 10);
        let home = TEAMS[id % TEAMS.len()];
        let away = TEAMS[(id + 1) % TEAMS.len()];
        writeln!(
            match_csv,
            "{id},{season},{home},{away},{home},Player {}",
            id % 30
        )
        .unwrap();

        for (batting, bowling) in [(home, away), (away, home)] {
            for ball in 0..120 {
                let over = ball / 6;
                let batter = format!("Player {}", (id + ball / 10) % 60);
                let bowler = format!("Player {}", 60 + (id + over) % 40);
                let runs = [0, 1, 4, 6, 2, 0, 1][ball % 7];
                let wicket = ball % 23 == 0;
                let kind = if wicket { "caught" } else { "NA" };
                let dismissed = if wicket { batter.as_str() } else { "NA" };
                writeln!(
                    delivery_csv,
                    "{id},{over},{},{batting},{bowling},{batter},Partner,{bowler},{runs},{runs},{},{kind},{dismissed}",
                    ball % 6 + 1,
                    wicket as u8
                )
                .unwrap();
            }
        }
    }

    (match_csv, delivery_csv)
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let loader = DatasetLoader::default();

    for matches in [100, 1000] {
        let (match_csv, delivery_csv) = synthetic_csv(matches);
        group.throughput(Throughput::Elements((matches * 240) as u64));

        group.bench_function(format!("load_{}_matches", matches), |b| {
            b.iter(|| {
                loader
                    .load_from_readers(
                        black_box(match_csv.as_bytes()),
                        black_box(delivery_csv.as_bytes()),
                    )
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_leaderboards(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaderboards");
    let (match_csv, delivery_csv) = synthetic_csv(1000);
    let data = DatasetLoader::default()
        .load_from_readers(match_csv.as_bytes(), delivery_csv.as_bytes())
        .unwrap();

    for board in Board::all() {
        group.bench_function(board.slug(), |b| {
            b.iter(|| board.compute(black_box(&data), None).unwrap())
        });
    }

    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");
    let (match_csv, delivery_csv) = synthetic_csv(1000);
    let data = DatasetLoader::default()
        .load_from_readers(match_csv.as_bytes(), delivery_csv.as_bytes())
        .unwrap();

    group.bench_function("player_search", |b| {
        b.iter(|| player_report(black_box(&data), PlayerQuery::Search("player 7")).unwrap())
    });

    group.bench_function("squad", |b| {
        b.iter(|| squad_for(black_box(&data), "Delhi Daredevils", 2012).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_leaderboards, bench_lookups);
criterion_main!(benches);
