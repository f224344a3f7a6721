//! End-to-end crawl scenarios over canned pages.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use gol_crawler::error::{AppError, Result};
use gol_crawler::models::{Config, MatchDetail, MatchStub, NOT_AVAILABLE, STUB_COLUMNS, TeamSide};
use gol_crawler::pipeline::{run_details, run_listing, run_pipeline};
use gol_crawler::services::{DetailExtractor, ListExtractor};
use gol_crawler::storage::{CsvStorage, DatasetStorage};
use gol_crawler::utils::PageFetcher;
use scraper::Html;
use tempfile::TempDir;

const LISTING_URL: &str = "https://gol.gg/tournament/tournament-matchlist/LTA%20South%202025%20Split%202/";
const GAME_1: &str = "https://gol.gg/game/stats/65719/page-game/";
const GAME_2: &str = "https://gol.gg/game/stats/65720/page-game/";

#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn with(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| AppError::Transport {
            url: url.to_string(),
            status: 503,
        })
    }
}

fn config() -> Config {
    let mut config = Config::default();
    config.crawler.request_delay_ms = 0;
    config
}

fn listing_row(game: u32, team1: &str, score: &str, team2: &str) -> String {
    format!(
        r#"<tr><td><a href="../game/stats/{game}/page-game/">{team1} vs {team2}</a></td>
        <td>{team1}</td><td>{score}</td><td>{team2}</td><td>WEEK2</td><td>15.11</td><td>2025-06-21</td></tr>"#
    )
}

fn listing_page(rows: &str) -> String {
    format!(
        r#"<html><body><table class="table_list">
        <tr><th>Game</th><th>Blue</th><th>Score</th><th>Red</th><th>Week</th><th>Patch</th><th>Date</th></tr>
        {rows}
        </table></body></html>"#
    )
}

fn team_block(kills: &[&str], bans: &[&str], picks: &[&str], drakes: &[&str], extra: &str) -> String {
    let score_boxes: String = kills
        .iter()
        .map(|k| format!(r#"<span class="score-box"><img alt="Kills"> {k}</span>"#))
        .collect();
    let icons = |names: &[&str]| -> String {
        names.iter().map(|n| format!(r#"<img alt="{n}">"#)).collect()
    };
    let drake_icons: String = drakes
        .iter()
        .map(|n| format!(r#"<img class="champion_icon_XS" alt="{n}">"#))
        .collect();
    let bans_html = if bans.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="col-2">Bans</div><div class="col-10">{}</div>"#, icons(bans))
    };

    format!(
        r#"<div class="col-12 col-sm-6">
            <div class="row">
                <div class="col-3">{score_boxes}</div>
                <div class="col-3"><span class="score-box"><img alt="Towers"> 9</span></div>
                <div class="col-3"><span class="score-box"><img alt="Dragon"> 3</span></div>
                <div class="col-3"><span class="score-box"><img alt="Nashor"> 1</span>
                    <span class="score-box"><img alt="Team Gold"> 64.5k</span></div>
            </div>
            <div class="row">{bans_html}<div class="col-2">Picks</div><div class="col-10">{}</div>
                <div class="col-2">{drake_icons}</div></div>
            {extra}
        </div>"#,
        icons(picks)
    )
}

fn detail_page() -> String {
    format!(
        r#"<html><body>
        <div class="col-6 text-center"><span>Game Time</span><h1>31:42</h1></div>
        {}
        {}
        </body></html>"#,
        team_block(
            &["5", "12"],
            &["Yone", "Rell"],
            &["Ahri", "Vi"],
            &["Infernal Drake", "Ocean Drake"],
            r#"<img alt="First Tower">"#
        ),
        team_block(&["7"], &[], &["Jinx"], &[], r#"<div><img alt="First Blood"></div>"#),
    )
}

#[test]
fn listing_without_marker_table_is_structure_not_found() {
    let extractor = ListExtractor::new(&config()).unwrap();
    let html = Html::parse_document("<html><body><table><tr><td>x</td></tr></table></body></html>");

    let result = extractor.extract(&html);
    assert!(matches!(result, Err(AppError::StructureNotFound(_))));
    assert!(result.unwrap_or_default().is_empty());
}

#[test]
fn scenario_a_malformed_row_is_dropped() {
    let extractor = ListExtractor::new(&config()).unwrap();
    let page = listing_page(&format!(
        "<tr><td>ad</td><td>banner</td><td>x</td></tr>{}",
        listing_row(65719, "paiN Gaming", "1 - 0", "LOUD")
    ));

    let stubs = extractor.extract(&Html::parse_document(&page)).unwrap();

    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].detail_url, GAME_1);
    assert_eq!(stubs[0].team1, "paiN Gaming");
    assert_eq!(stubs[0].week, "2");
    // the malformed row still holds position 1
    assert_eq!(stubs[0].sequence_id, 2);
}

#[test]
fn scenario_b_and_c_detail_fields() {
    let extractor = DetailExtractor::new(&config()).unwrap();
    let detail = extractor.extract(&Html::parse_document(&detail_page()));

    // B: first blood icon nested inside the second team block
    assert_eq!(detail.first_blood, Some(TeamSide::Two));
    assert_eq!(detail.first_tower, Some(TeamSide::One));
    // C: repeated kill boxes, last one wins
    assert_eq!(detail.teams[0].kills.as_deref(), Some("12"));

    let record = detail.to_record();
    assert_eq!(record.get("duration"), Some("31:42"));
    assert_eq!(record.get("team1_towers"), Some("9"));
    assert_eq!(record.get("team1_dragons"), Some("3"));
    assert_eq!(record.get("team1_barons"), Some("1"));
    assert_eq!(record.get("team1_gold"), Some("64.5k"));
    assert_eq!(record.get("team1_bans"), Some("Yone, Rell"));
    assert_eq!(record.get("team1_picks"), Some("Ahri, Vi"));
    assert_eq!(record.get("team1_dragon_types"), Some("Infernal, Ocean"));
    assert_eq!(record.get("team2_kills"), Some("7"));
    assert_eq!(record.get("team2_bans"), Some(""));
    assert_eq!(record.get("team2_picks"), Some("Jinx"));
    assert_eq!(record.get("team2_dragon_types"), Some(NOT_AVAILABLE));
    assert_eq!(record.get("fb"), Some("2"));
    assert_eq!(record.get("ft"), Some("1"));
}

#[test]
fn detail_extraction_is_idempotent() {
    let extractor = DetailExtractor::new(&config()).unwrap();
    let html = Html::parse_document(&detail_page());

    assert_eq!(extractor.extract(&html), extractor.extract(&html));
}

#[test]
fn merging_sentinel_detail_preserves_stub() {
    let stub = MatchStub {
        sequence_id: 3,
        team1: "Fluxo W7M".into(),
        team2: "Vivo Keyd Stars".into(),
        wins1: "0".into(),
        wins2: "1".into(),
        week: "2".into(),
        date: "2025-06-22".into(),
        detail_url: GAME_2.into(),
    };

    let mut record = stub.to_record();
    record.merge(MatchDetail::default().to_record());

    for (key, value) in stub.to_record().iter() {
        assert_eq!(record.get(key), Some(value));
    }
    for (key, value) in record.iter().filter(|(k, _)| !STUB_COLUMNS.contains(k)) {
        if key.ends_with("_bans") || key.ends_with("_picks") {
            assert_eq!(value, "", "{key}");
        } else {
            assert_eq!(value, NOT_AVAILABLE, "{key}");
        }
    }
}

#[tokio::test]
async fn scenario_d_blank_url_skipped_and_batch_continues() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("matches.csv");
    let output = tmp.path().join("details.csv");

    let blank = MatchStub {
        sequence_id: 1,
        team1: "A".into(),
        team2: "B".into(),
        wins1: "1".into(),
        wins2: "0".into(),
        week: "1".into(),
        date: "2025-06-14".into(),
        detail_url: String::new(),
    };
    let failing = MatchStub {
        sequence_id: 2,
        detail_url: GAME_1.into(),
        ..blank.clone()
    };
    let good = MatchStub {
        sequence_id: 3,
        detail_url: GAME_2.into(),
        ..blank.clone()
    };
    let rows = vec![blank.to_record(), failing.to_record(), good.to_record()];
    CsvStorage.write_rows(&rows, &input).await.unwrap();

    let fetcher = FakeFetcher::default().with(GAME_2, detail_page());
    let summary = run_details(&config(), &fetcher, &input, &output, false)
        .await
        .unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.fetched, 1);
    assert_eq!(fetcher.requests(), vec![GAME_1.to_string(), GAME_2.to_string()]);

    // blank-url stub absent; error-status page keeps its stub fields only
    let written = CsvStorage.read_rows(&output).await.unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].get("id"), Some("2"));
    assert_eq!(written[0].get("team1"), Some("A"));
    assert_eq!(written[0].get("team1_kills"), Some(""));
    assert_eq!(written[1].get("id"), Some("3"));
    assert_eq!(written[1].get("team1_kills"), Some("12"));
}

#[tokio::test]
async fn resume_retries_failed_and_skips_detailed_matches() {
    let tmp = TempDir::new().unwrap();
    let listing = tmp.path().join("matches.csv");
    let output = tmp.path().join("details.csv");

    let page = listing_page(&format!(
        "{}{}",
        listing_row(65719, "paiN Gaming", "1 - 0", "LOUD"),
        listing_row(65720, "FURIA", "0 - 1", "RED Canids"),
    ));
    let first = FakeFetcher::default()
        .with(LISTING_URL, page.clone())
        .with(GAME_1, detail_page());
    run_listing(&config(), &first, LISTING_URL, &listing).await.unwrap();
    let summary = run_details(&config(), &first, &listing, &output, false)
        .await
        .unwrap();
    assert_eq!(summary.failed, 1);

    let second = FakeFetcher::default()
        .with(GAME_1, "<html></html>")
        .with(GAME_2, detail_page());
    let summary = run_details(&config(), &second, &listing, &output, true)
        .await
        .unwrap();

    assert_eq!(second.requests(), vec![GAME_2.to_string()]);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.fetched, 1);

    let written = CsvStorage.read_rows(&output).await.unwrap();
    let urls: Vec<&str> = written.iter().filter_map(|r| r.get("url")).collect();
    assert_eq!(urls, vec![GAME_1, GAME_2]);
    assert_eq!(written[0].get("duration"), Some("31:42"));
    assert_eq!(written[1].get("duration"), Some("31:42"));
}

#[tokio::test]
async fn pipeline_writes_both_datasets() {
    let tmp = TempDir::new().unwrap();
    let listing = tmp.path().join("raw/lta_south_matches.csv");
    let details = tmp.path().join("raw/detailed_matches.json");

    let fetcher = FakeFetcher::default()
        .with(
            LISTING_URL,
            listing_page(&listing_row(65719, "paiN Gaming", "1 - 0", "LOUD")),
        )
        .with(GAME_1, detail_page());

    let summary = run_pipeline(&config(), &fetcher, &listing, &details)
        .await
        .unwrap();
    assert_eq!(summary.fetched, 1);

    let stubs = CsvStorage.read_rows(&listing).await.unwrap();
    assert_eq!(stubs.len(), 1);
    assert_eq!(stubs[0].get("url"), Some(GAME_1));
    assert_eq!(stubs[0].get("duration"), None);

    let text = std::fs::read_to_string(&details).unwrap();
    assert!(text.contains("\"fb\": \"2\""));
}
