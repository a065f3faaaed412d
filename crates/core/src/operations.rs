// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Well-known lock names, one per synchronized system or job

pub const HUBSPOT_SYNC: &str = "hubspot-sync";
pub const STRIPE_SYNC: &str = "stripe-sync";
pub const BI_AGENT: &str = "bi-agent";
pub const INTERVENTIONS: &str = "interventions";
pub const CHURN_PREDICTOR: &str = "churn-predictor";
pub const DAILY_REPORT: &str = "daily-report";

/// Every well-known name
pub const ALL: [&str; 6] = [
    HUBSPOT_SYNC,
    STRIPE_SYNC,
    BI_AGENT,
    INTERVENTIONS,
    CHURN_PREDICTOR,
    DAILY_REPORT,
];
