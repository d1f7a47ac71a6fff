//! Runs the resolver over a small demo campaign, once per assignment
//! method, and prints the stats and the final roster.
//!
//! Set `RGS_RESOLVER.SEED`/`rgs.toml` to pin the draws, `RUST_LOG` to see
//! the pass logs.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ranked_group_signup_config::get_config;
use ranked_group_signup_domain::report::{campaign_report, roster};
use ranked_group_signup_domain::submission::{submit_ranking, RankedChoice};
use ranked_group_signup_domain::{
    AssignmentMethod, Campaign, CampaignId, Group, GroupId, Rank, Registration, StudentId,
};
use ranked_group_signup_resolver::{mark_resolved, needs_resolution, resolve};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn demo_groups() -> Vec<Group> {
    [("L1 clouds", 2), ("L2 devops", 2), ("L3 security", 1)]
        .into_iter()
        .enumerate()
        .map(|(idx, (name, capacity))| Group {
            id: GroupId(i32::try_from(idx).unwrap() + 1),
            campaign_id: CampaignId(1),
            name: name.to_owned(),
            capacity,
        })
        .collect()
}

fn submission_instant(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 12, 9, minute, 0).unwrap()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = get_config()?;

    let mut campaign = Campaign {
        id: CampaignId(1),
        title: "winter 2026 lab signup".to_owned(),
        starts_at: Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap(),
        ends_at: Utc.with_ymd_and_hms(2026, 1, 24, 0, 0, 0).unwrap(),
        assignment_method: config.default_assignment_method,
        last_resolved_method: None,
    };
    let groups = demo_groups();

    // six students hand in full rankings a few minutes apart; the first two
    // share an instant so the first-come tie-break has something to do
    let rankings: [(i32, [i32; 3], u32); 6] = [
        (1, [1, 2, 3], 0),
        (2, [1, 3, 2], 0),
        (3, [1, 2, 3], 5),
        (4, [2, 1, 3], 9),
        (5, [3, 1, 2], 14),
        (6, [1, 2, 3], 20),
    ];

    let mut registrations: Vec<Registration> = Vec::new();
    for (student, groups_by_rank, minute) in rankings {
        let choices: Vec<RankedChoice> = groups_by_rank
            .into_iter()
            .enumerate()
            .map(|(idx, group)| RankedChoice {
                group: GroupId(group),
                rank: Rank(u32::try_from(idx).unwrap() + 1),
            })
            .collect();
        let batch = submit_ranking(
            &campaign,
            &groups,
            &registrations,
            StudentId(student),
            &choices,
            submission_instant(minute),
        )?;
        registrations.extend(batch);
    }
    info!(
        students = rankings.len(),
        registrations = registrations.len(),
        "submissions collected"
    );

    for method in [
        AssignmentMethod::Fcfs,
        AssignmentMethod::Lottery,
        AssignmentMethod::Random,
    ] {
        campaign.assignment_method = method;
        if !needs_resolution(&campaign, false) {
            continue;
        }

        let mut rng = match config.resolver.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stats = resolve(&campaign, &groups, &mut registrations, &mut rng);
        mark_resolved(&mut campaign);

        println!("== {method} ==");
        println!("{}", serde_json::to_string_pretty(&stats)?);
        println!(
            "{}",
            serde_json::to_string_pretty(&roster(&campaign, &groups, &registrations))?
        );
    }

    let report = campaign_report(&campaign, &groups, &registrations);
    println!("== final report ==");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
