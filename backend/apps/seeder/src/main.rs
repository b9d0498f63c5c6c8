//! Offline data tools
//!
//! `seed` idempotently populates the reference catalogues; `import`
//! bulk-loads colleges from a JSON export, upserting by name+city.
//! Both run against DATABASE_URL and never touch user data.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seeder", about = "Reference data seeder and college importer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Populate the reference tables (idempotent)
    Seed {
        /// Seed only the named table group
        #[arg(long)]
        only: Option<String>,
    },
    /// Bulk-import colleges from a JSON export
    Import {
        #[arg(long)]
        file: PathBuf,
    },
}

const COLLEGE_TYPES: &[&str] = &["Engineering", "Medical", "Law", "Arts & Science"];
const DEGREE_TYPES: &[&str] = &["Undergraduate", "Postgraduate", "Diploma"];
const DEGREES: &[(&str, &str)] = &[
    ("B.E.", "Undergraduate"),
    ("B.Tech", "Undergraduate"),
    ("MBBS", "Undergraduate"),
    ("LL.B.", "Undergraduate"),
    ("B.Sc.", "Undergraduate"),
    ("B.A.", "Undergraduate"),
    ("M.E.", "Postgraduate"),
    ("M.Tech", "Postgraduate"),
    ("M.Sc.", "Postgraduate"),
];
const HOSTEL_SHARING_TYPES: &[&str] = &["Single", "Double", "Triple", "Dormitory"];
const APPLICATION_STATUSES: &[&str] = &["ready_to_pay", "paid"];
const ENTRANCE_EXAMS: &[&str] = &["JEE Main", "JEE Advanced", "NEET", "CLAT", "CUET"];
const COMPLAINTS: &[(&str, &str)] = &[
    ("Payment issue", "Fee was deducted but the application is not marked paid"),
    ("Document upload failed", "Certificate upload keeps failing"),
    ("OTP not received", "Login code does not arrive by SMS"),
    ("Wrong college details", "Catalogue lists incorrect information"),
    ("Other", "Anything not covered above"),
];

#[derive(Debug, Deserialize)]
struct CollegeImport {
    name: String,
    city: String,
    state: String,
    category: String,
    application_fee: Decimal,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ranking: Option<i32>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    established_year: Option<i32>,
    #[serde(default)]
    affiliation: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    match cli.command {
        Command::Seed { only } => seed(&pool, only.as_deref()).await,
        Command::Import { file } => import(&pool, &file).await,
    }
}

fn wants(only: Option<&str>, name: &str) -> bool {
    only.is_none_or(|o| o == name)
}

async fn seed(pool: &PgPool, only: Option<&str>) -> anyhow::Result<()> {
    if wants(only, "college_types") {
        seed_names(pool, "college_types", COLLEGE_TYPES).await?;
    }
    if wants(only, "degree_types") {
        seed_names(pool, "degree_types", DEGREE_TYPES).await?;
    }
    if wants(only, "degrees") {
        seed_degrees(pool).await?;
    }
    if wants(only, "hostel_sharing_types") {
        seed_names(pool, "hostel_sharing_types", HOSTEL_SHARING_TYPES).await?;
    }
    if wants(only, "application_statuses") {
        seed_names(pool, "application_statuses", APPLICATION_STATUSES).await?;
    }
    if wants(only, "entrance_exams") {
        seed_names(pool, "entrance_exams", ENTRANCE_EXAMS).await?;
    }
    if wants(only, "complaints") {
        seed_complaints(pool).await?;
    }
    tracing::info!("Seeding completed");
    Ok(())
}

async fn seed_names(pool: &PgPool, table: &str, names: &[&str]) -> anyhow::Result<()> {
    // table names come from the constant lists above, never from input
    let sql = format!("INSERT INTO {table} (name) VALUES ($1) ON CONFLICT (name) DO NOTHING");
    let mut inserted = 0u64;
    for name in names {
        inserted += sqlx::query(&sql)
            .bind(name)
            .execute(pool)
            .await?
            .rows_affected();
    }
    tracing::info!(table, inserted, total = names.len(), "reference table seeded");
    Ok(())
}

async fn seed_degrees(pool: &PgPool) -> anyhow::Result<()> {
    let mut inserted = 0u64;
    for (name, degree_type) in DEGREES {
        inserted += sqlx::query(
            "INSERT INTO degrees (name, degree_type_id) \
             SELECT $1, id FROM degree_types WHERE name = $2 \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(degree_type)
        .execute(pool)
        .await?
        .rows_affected();
    }
    tracing::info!(inserted, total = DEGREES.len(), "degrees seeded");
    Ok(())
}

async fn seed_complaints(pool: &PgPool) -> anyhow::Result<()> {
    let mut inserted = 0u64;
    for (title, description) in COMPLAINTS {
        inserted += sqlx::query(
            "INSERT INTO complaints (title, description) VALUES ($1, $2) \
             ON CONFLICT (title) DO NOTHING",
        )
        .bind(title)
        .bind(description)
        .execute(pool)
        .await?
        .rows_affected();
    }
    tracing::info!(inserted, total = COMPLAINTS.len(), "complaints seeded");
    Ok(())
}

async fn import(pool: &PgPool, file: &PathBuf) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let colleges: Vec<CollegeImport> =
        serde_json::from_str(&raw).context("import file must be a JSON array of colleges")?;

    let mut imported = 0u64;
    let mut skipped = 0u64;
    for college in &colleges {
        let result = sqlx::query(
            "INSERT INTO colleges \
             (ref_id, name, city, state, college_type_id, description, application_fee, \
              ranking, image_url, established_year, affiliation) \
             SELECT gen_random_uuid(), $1, $2, $3, t.id, $4, $5, $6, $7, $8, $9 \
             FROM college_types t WHERE t.name = $10 \
             ON CONFLICT (name, city) DO UPDATE SET \
                state = EXCLUDED.state, \
                college_type_id = EXCLUDED.college_type_id, \
                description = EXCLUDED.description, \
                application_fee = EXCLUDED.application_fee, \
                ranking = EXCLUDED.ranking, \
                image_url = EXCLUDED.image_url, \
                established_year = EXCLUDED.established_year, \
                affiliation = EXCLUDED.affiliation, \
                updated_at = NOW()",
        )
        .bind(&college.name)
        .bind(&college.city)
        .bind(&college.state)
        .bind(&college.description)
        .bind(college.application_fee)
        .bind(college.ranking)
        .bind(&college.image_url)
        .bind(college.established_year)
        .bind(&college.affiliation)
        .bind(&college.category)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(
                name = %college.name,
                category = %college.category,
                "skipped: unknown category (run `seeder seed` first)"
            );
            skipped += 1;
        } else {
            imported += 1;
        }
    }

    tracing::info!(imported, skipped, total = colleges.len(), "import completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_record_parsing() {
        let raw = r#"[{
            "name": "IIT Madras",
            "city": "Chennai",
            "state": "Tamil Nadu",
            "category": "Engineering",
            "application_fee": "1500.00",
            "ranking": 1,
            "established_year": 1959
        }]"#;
        let colleges: Vec<CollegeImport> = serde_json::from_str(raw).unwrap();
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].application_fee, Decimal::new(150000, 2));
        assert!(colleges[0].image_url.is_none());
    }

    #[test]
    fn test_wants_filter() {
        assert!(wants(None, "degrees"));
        assert!(wants(Some("degrees"), "degrees"));
        assert!(!wants(Some("complaints"), "degrees"));
    }
}
