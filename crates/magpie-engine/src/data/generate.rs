//! Generated-data producer for employee records.
//!
//! Records are keyed by a short run discriminator (the parallel-run
//! prefix), so concurrent runs generate disjoint ids and do not collide on
//! the same reporting lead.

use magpie_common::record::Record;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reporting leads known to exist in the target environment.
const VALID_REPORTING_LEADS: &[&str] = &[
    "exploring@gmail.com",
    "chandana.vennam@optimworks.com",
    "abcdabc@gmail.com",
    "nothing111@gmail.com",
];

static EMPLOYEE_COUNTER: AtomicUsize = AtomicUsize::new(1);

fn random_letters(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn random_number(min: u64, max: u64) -> String {
    rand::thread_rng().gen_range(min..=max).to_string()
}

fn lead_for_prefix(prefix: &str) -> &'static str {
    let index = match prefix {
        "ch" => 0,
        "ff" => 1,
        "wk" => 2,
        "wi" => 3,
        _ => 0,
    };
    VALID_REPORTING_LEADS[index % VALID_REPORTING_LEADS.len()]
}

/// Generate one employee record keyed by the run discriminator.
///
/// Ids combine the prefix, a process-wide counter, and a random suffix, so
/// re-running a scenario never reuses an id that an earlier failed cleanup
/// may have left behind.
pub fn employee_record(prefix: &str) -> Record {
    let counter = EMPLOYEE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = random_number(1000, 9999);

    let mut record = Record::new();
    record.set("firstName", format!("{prefix}{}", random_letters(4)));
    record.set("lastName", format!("{prefix}{}", random_letters(5)));
    record.set("empId", format!("EMP{prefix}{counter}{suffix}"));
    record.set(
        "email",
        format!("{prefix}{}{counter}{suffix}@urbuddi.com", random_letters(4)),
    );
    record.set("password", "PassWord123");
    record.set("mobile", format!("9{}", random_number(100_000_000, 999_999_999)));
    record.set("dept", "Development");
    record.set("designation", "Developer");
    record.set("salary", "50000");
    record.set("location", "Bangalore");
    record.set("role", "Employee");
    record.set("gender", "Male");
    record.set("bloodGroup", "A+");
    record.set("reporting", lead_for_prefix(prefix));
    record.set("degree", "Degree");
    record.set("dob", "1995-01-01");
    record.set("joinDate", "2026-01-22");
    record
}
