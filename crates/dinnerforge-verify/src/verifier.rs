//! Schedule verifier.

use std::collections::{BTreeMap, BTreeSet};

use dinnerforge_core::{
    HistoricalPairs, Pair, ParticipantIndex, PreviousHosting, Roster, Schedule, SECTION_COUNT,
};
use tracing::debug;

use crate::report::{CheckResult, VerificationReport};
use crate::violation::{Category, Violation};

/// Times each participant appears in a valid schedule.
const APPEARANCES: usize = 3;

/// Re-checks a schedule against the roster and last year's data.
///
/// The verifier only reads its inputs. Sections are derived from record
/// positions with a section size of `ceil(len / 3)`, so a schedule of the
/// wrong length is still checked as far as it can be.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleVerifier<'a> {
    roster: &'a Roster,
    previous: &'a PreviousHosting,
    history: &'a HistoricalPairs,
}

/// A record resolved against the roster.
struct Resolved<'s> {
    position: usize,
    section: usize,
    members: [&'s str; 3],
    indices: [Option<ParticipantIndex>; 3],
}

impl<'s> Resolved<'s> {
    /// Distinct addresses of the record, host first.
    fn distinct_members(&self) -> Vec<&'s str> {
        let mut seen = Vec::with_capacity(3);
        for address in self.members {
            if !seen.contains(&address) {
                seen.push(address);
            }
        }
        seen
    }
}

impl<'a> ScheduleVerifier<'a> {
    pub fn new(
        roster: &'a Roster,
        previous: &'a PreviousHosting,
        history: &'a HistoricalPairs,
    ) -> Self {
        ScheduleVerifier {
            roster,
            previous,
            history,
        }
    }

    /// Runs every check and collects all violations.
    pub fn verify(&self, schedule: &Schedule) -> VerificationReport {
        let section_size = Schedule::positional_section_size(schedule.len());
        let records: Vec<Resolved<'_>> = schedule
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let members = record.members().map(str::trim);
                Resolved {
                    position,
                    section: position / section_size,
                    members,
                    indices: members.map(|address| self.roster.index_of(address)),
                }
            })
            .collect();

        let mut checks = Vec::with_capacity(12);
        self.check_structure(schedule, &records, &mut checks);
        self.check_participation(&records, &mut checks);
        self.check_sections(&records, &mut checks);
        self.check_pairs(&records, &mut checks);

        let report = VerificationReport::new(checks);
        debug!(
            event = "verify_end",
            records = schedule.len(),
            valid = report.all_valid(),
            violations = report.violation_count(),
            reused_pairs = report.historical_reuse_count(),
        );
        report
    }

    fn check_structure(
        &self,
        schedule: &Schedule,
        records: &[Resolved<'_>],
        checks: &mut Vec<CheckResult>,
    ) {
        let mut length = Vec::new();
        if schedule.len() != self.roster.len() {
            length.push(Violation::WrongLength {
                expected: self.roster.len(),
                actual: schedule.len(),
            });
        }

        let mut malformed = Vec::new();
        let mut unknown = Vec::new();
        for record in records {
            for (i, address) in record.members.iter().enumerate() {
                if record.members[..i].contains(address) {
                    malformed.push(Violation::MalformedTriplet {
                        position: record.position,
                        address: address.to_string(),
                    });
                }
            }
            for (address, index) in record.members.iter().zip(record.indices) {
                if index.is_none() {
                    unknown.push(Violation::UnknownAddress {
                        position: record.position,
                        address: address.to_string(),
                    });
                }
            }
        }

        let mut labels = Vec::new();
        for (record, resolved) in schedule.iter().zip(records) {
            if record.slot != resolved.position {
                labels.push(Violation::SlotLabelMismatch {
                    position: resolved.position,
                    label: record.slot,
                });
            }
            if record.section != resolved.section + 1 {
                labels.push(Violation::SectionLabelMismatch {
                    position: resolved.position,
                    expected: resolved.section + 1,
                    label: record.section,
                });
            }
        }

        let category = Category::BasicStructure;
        checks.push(CheckResult::new("schedule length", category, true, length));
        checks.push(CheckResult::new("proper triplets", category, true, malformed));
        checks.push(CheckResult::new("known addresses", category, true, unknown));
        checks.push(CheckResult::new("slot and section labels", category, true, labels));
    }

    fn check_participation(&self, records: &[Resolved<'_>], checks: &mut Vec<CheckResult>) {
        let n = self.roster.len();
        let mut appearances = vec![0usize; n];
        let mut hostings = vec![0usize; n];
        let mut distinct: BTreeSet<&str> = BTreeSet::new();
        for record in records {
            for (slot_member, index) in record.indices.iter().enumerate() {
                if let Some(p) = *index {
                    appearances[p] += 1;
                    if slot_member == 0 {
                        hostings[p] += 1;
                    }
                }
            }
            distinct.extend(record.members);
        }

        let mut counts = Vec::new();
        let mut hosts = Vec::new();
        let mut missing = Vec::new();
        for (p, address) in self.roster.iter() {
            // A missing address is reported once, not once per count.
            if appearances[p] == 0 {
                missing.push(Violation::MissingAddress {
                    address: address.to_string(),
                });
                continue;
            }
            if appearances[p] != APPEARANCES {
                counts.push(Violation::AppearanceCount {
                    address: address.to_string(),
                    count: appearances[p],
                });
            }
            if hostings[p] != 1 {
                hosts.push(Violation::HostCount {
                    address: address.to_string(),
                    count: hostings[p],
                });
            }
        }

        let mut participants = Vec::new();
        if distinct.len() != n {
            participants.push(Violation::ParticipantCountMismatch {
                expected: n,
                actual: distinct.len(),
            });
        }

        let category = Category::Participation;
        checks.push(CheckResult::new("three appearances each", category, true, counts));
        checks.push(CheckResult::new("one hosting each", category, true, hosts));
        checks.push(CheckResult::new("every address used", category, true, missing));
        checks.push(CheckResult::new("participant count", category, true, participants));
    }

    fn check_sections(&self, records: &[Resolved<'_>], checks: &mut Vec<CheckResult>) {
        let n = self.roster.len();
        let mut per_section = vec![[0usize; SECTION_COUNT]; n];
        let mut seen = vec![false; n];
        let mut previous = Vec::new();

        for record in records {
            let in_range = record.section < SECTION_COUNT;
            for p in record.indices.iter().flatten().copied() {
                seen[p] = true;
                if in_range {
                    per_section[p][record.section] += 1;
                }
            }
            if let Some(host) = record.indices[0] {
                if self.previous.forbids(host, record.section) {
                    previous.push(Violation::PreviousSection {
                        address: record.members[0].to_string(),
                        position: record.position,
                        section: record.section + 1,
                    });
                }
            }
        }

        let mut distribution = Vec::new();
        for (p, address) in self.roster.iter() {
            if !seen[p] {
                continue;
            }
            for (section, &count) in per_section[p].iter().enumerate() {
                if count != 1 {
                    distribution.push(Violation::SectionDistribution {
                        address: address.to_string(),
                        section: section + 1,
                        count,
                    });
                }
            }
        }

        let category = Category::Sections;
        checks.push(CheckResult::new("once per section", category, true, distribution));
        checks.push(CheckResult::new(
            "no host in previous section",
            category,
            true,
            previous,
        ));
    }

    fn check_pairs(&self, records: &[Resolved<'_>], checks: &mut Vec<CheckResult>) {
        let mut meetings: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut met: BTreeSet<Pair> = BTreeSet::new();

        for record in records {
            let members = record.distinct_members();
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    let key = if a < b { (a, b) } else { (b, a) };
                    *meetings.entry(key).or_insert(0) += 1;
                }
            }
            let known: Vec<ParticipantIndex> = record.indices.iter().flatten().copied().collect();
            for (i, &a) in known.iter().enumerate() {
                for &b in &known[i + 1..] {
                    met.extend(Pair::new(a, b));
                }
            }
        }

        let duplicates = meetings
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|((first, second), count)| Violation::DuplicatePair {
                first: first.to_string(),
                second: second.to_string(),
                count,
            })
            .collect();

        let reused = met
            .into_iter()
            .filter(|&pair| self.history.contains(pair))
            .filter_map(|pair| {
                let first = self.roster.address(pair.low())?;
                let second = self.roster.address(pair.high())?;
                let (first, second) = if first <= second {
                    (first, second)
                } else {
                    (second, first)
                };
                Some(Violation::HistoricalPairReused {
                    first: first.to_string(),
                    second: second.to_string(),
                })
            })
            .collect();

        let category = Category::Pairs;
        checks.push(CheckResult::new("pairs meet once", category, true, duplicates));
        checks.push(CheckResult::new(
            "historical pairs avoided",
            category,
            false,
            reused,
        ));
    }
}
