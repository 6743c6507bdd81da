//! Synthetic phlebotomy site records for non-production environments.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::attribute::{AttributeMap, AttributeValue};
use crate::item::WriteItem;
use crate::table::TableName;

pub const DEFAULT_SITE_COUNT: usize = 9;
pub const DEFAULT_SITE_TABLE: &str = "PhlebotomySite";
pub const DEFAULT_SITE_BATCH_SIZE: usize = 25;
/// Key attribute of the site table.
pub const SITE_KEY: &str = "ClinicId";

const WEEKS_OF_CAPACITY: i64 = 6;
const MAX_WEEKLY_CAPACITY: u32 = 100;

const STREETS: &[&str] = &["Road", "Street", "Avenue", "Hospital"];
const CITIES: &[&str] = &["Rivendell", "Gondor", "Mordor", "Hobbiton"];
const WORDS: &[&str] = &[
    "acorn", "bramble", "copper", "dapple", "elder", "fennel", "garnet", "hazel", "ivory",
    "juniper", "kestrel", "larch", "meadow", "nettle", "orchard", "pebble", "quarry", "rowan",
    "sorrel", "thistle", "umber", "willow", "yarrow",
];

/// Build `count` synthetic sites dated relative to `now`.
///
/// Clinic ids are unique within one call.
pub fn phlebotomy_sites<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    count: usize,
    table: &TableName,
) -> Vec<WriteItem> {
    let prev_invite_date = (now - Duration::weeks(2))
        .format("%A %-d %B %Y")
        .to_string();
    let week_dates: Vec<String> = (1..=WEEKS_OF_CAPACITY)
        .map(|week| {
            (now + Duration::weeks(week + 1))
                .format("%-d %B %Y")
                .to_string()
        })
        .collect();

    let mut clinic_ids = HashSet::with_capacity(count);
    let mut sites = Vec::with_capacity(count);

    for number in 1..=count {
        let clinic_id = loop {
            let candidate = clinic_id(rng);
            if clinic_ids.insert(candidate.clone()) {
                break candidate;
            }
        };

        let postcode = postcode(rng);
        let word = WORDS.choose(rng).copied().unwrap_or("green");
        let street = STREETS.choose(rng).copied().unwrap_or("Road");
        let city = CITIES.choose(rng).copied().unwrap_or("Hobbiton");

        let capacities: Vec<u32> = week_dates
            .iter()
            .map(|_| rng.gen_range(0..=MAX_WEEKLY_CAPACITY))
            .collect();
        let availability: u32 = capacities.iter().sum();
        let invites_sent = availability / 2;

        let weeks: AttributeMap = week_dates
            .iter()
            .zip(&capacities)
            .map(|(date, capacity)| (date.clone(), AttributeValue::number(capacity.to_string())))
            .collect();

        let mut attributes = AttributeMap::with_capacity(11);
        attributes.insert(SITE_KEY, AttributeValue::string(clinic_id));
        attributes.insert(
            "ClinicName",
            AttributeValue::string(format!("Phlebotomy clinic {}", number)),
        );
        attributes.insert(
            "Address",
            AttributeValue::string(format!(
                "{} {} {} , {} {}",
                number, word, street, city, postcode
            )),
        );
        attributes.insert(
            "Directions",
            AttributeValue::string("These will contain directions to the site"),
        );
        attributes.insert("ICBCode", AttributeValue::string(practice_code(rng)));
        attributes.insert("ODSCode", AttributeValue::string(practice_code(rng)));
        attributes.insert("PostCode", AttributeValue::string(postcode));
        attributes.insert("PrevInviteDate", AttributeValue::string(prev_invite_date.clone()));
        attributes.insert("WeekCommencingDate", AttributeValue::M(weeks));
        attributes.insert("Availability", AttributeValue::number(availability.to_string()));
        attributes.insert("InvitesSent", AttributeValue::number(invites_sent.to_string()));

        sites.push(WriteItem::new(table.clone(), attributes));
    }

    sites
}

fn letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(rng.gen_range(b'A'..=b'Z'))
}

fn digit<R: Rng + ?Sized>(rng: &mut R, max: u8) -> char {
    char::from(b'0' + rng.gen_range(0..=max))
}

/// `AA00A000`
fn clinic_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(8);
    id.push(letter(rng));
    id.push(letter(rng));
    id.push(digit(rng, 9));
    id.push(digit(rng, 9));
    id.push(letter(rng));
    for _ in 0..3 {
        id.push(digit(rng, 9));
    }
    id
}

/// `AA0 0AA`, outward digit limited to 0-2
fn postcode<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{}{} {}{}{}",
        letter(rng),
        letter(rng),
        digit(rng, 2),
        digit(rng, 9),
        letter(rng),
        letter(rng)
    )
}

/// `A00000`
fn practice_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(6);
    code.push(letter(rng));
    for _ in 0..5 {
        code.push(digit(rng, 9));
    }
    code
}
