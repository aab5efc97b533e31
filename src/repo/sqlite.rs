//! SQLite-backed repository.

use std::path::Path;

use rusqlite::{types::Value, Connection, OpenFlags};

use crate::{common::Chromosome, conf::SchemaConf, err::RepositoryError};

use super::{AssociationRecord, PhenotypeRecord, ResultRepository};

/// Check that `name` is a plain (optionally schema-qualified) SQL identifier.
fn check_identifier(name: &str) -> Result<&str, RepositoryError> {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| {
        regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("invalid regex")
    });
    if re.is_match(name) {
        Ok(name)
    } else {
        Err(RepositoryError::InvalidIdentifier(name.to_string()))
    }
}

/// Convert the stored chromosome value; integer columns become their decimal text.
fn chromosome_from_value(value: Value) -> Result<Chromosome, RepositoryError> {
    match value {
        Value::Integer(i) => Ok(Chromosome::new(i.to_string())),
        Value::Real(r) if r.fract() == 0.0 => Ok(Chromosome::new((r as i64).to_string())),
        Value::Text(s) => Ok(Chromosome::new(s)),
        other => Err(RepositoryError::InvalidValue {
            column: "CHR".to_string(),
            value: format!("{:?}", other),
        }),
    }
}

/// Repository reading from a SQLite database.
///
/// The phecode is always bound as a query parameter.  Table names come from
/// the configuration and are validated as identifiers up front.
pub struct SqliteRepository {
    conn: Connection,
    /// Query for the associations of one phecode.
    sql_associations: String,
    /// Query for the phenotype metadata of one phecode.
    sql_phenotypes: String,
}

impl std::fmt::Debug for SqliteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("sql_associations", &self.sql_associations)
            .field("sql_phenotypes", &self.sql_phenotypes)
            .finish()
    }
}

impl SqliteRepository {
    /// Open the database at `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P, schema: &SchemaConf) -> Result<Self, RepositoryError> {
        tracing::debug!("Opening SQLite database {:?}", path.as_ref());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::with_connection(conn, schema)
    }

    /// Wrap an existing connection.
    pub fn with_connection(conn: Connection, schema: &SchemaConf) -> Result<Self, RepositoryError> {
        let variants = check_identifier(&schema.variants_table)?;
        let stats = check_identifier(&schema.stats_table)?;
        let phenotypes = check_identifier(&schema.phenotypes_table)?;

        let sql_associations = format!(
            "SELECT v.VAR_ID, v.CHR, v.POS, v.GENE, v.IMPACT, v.EFFECT, v.HGVS_c, \
             g.MAF, g.EFFECTSIZE, g.SE, g.LOG10P \
             FROM {stats} g INNER JOIN {variants} v USING (VAR_ID) \
             WHERE g.PHECODE = ?1"
        );
        let sql_phenotypes = format!(
            "SELECT phenotype, PHECODE, cases, controls, category \
             FROM {phenotypes} WHERE PHECODE = ?1"
        );

        Ok(Self {
            conn,
            sql_associations,
            sql_phenotypes,
        })
    }
}

impl ResultRepository for SqliteRepository {
    fn fetch_associations(&self, phecode: &str) -> Result<Vec<AssociationRecord>, RepositoryError> {
        let mut stmt = self.conn.prepare_cached(&self.sql_associations)?;
        let rows = stmt.query_map([phecode], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Value>(1)?,
                AssociationRecord {
                    variant_id: String::new(),
                    chromosome: Chromosome::new(""),
                    position: row.get(2)?,
                    gene: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    impact: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                    effect: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    hgvs_c: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                    maf: row.get(7)?,
                    effect_size: row.get(8)?,
                    standard_error: row.get(9)?,
                    log10p: row.get(10)?,
                },
            ))
        })?;

        let mut result = Vec::new();
        for row in rows {
            let (variant_id, chrom, record) = row?;
            result.push(AssociationRecord {
                variant_id,
                chromosome: chromosome_from_value(chrom)?,
                ..record
            });
        }
        Ok(result)
    }

    fn fetch_phenotype_info(&self, phecode: &str) -> Result<Vec<PhenotypeRecord>, RepositoryError> {
        let mut stmt = self.conn.prepare_cached(&self.sql_phenotypes)?;
        let rows = stmt.query_map([phecode], |row| {
            Ok(PhenotypeRecord {
                phenotype: row.get(0)?,
                phecode: row.get(1)?,
                cases: row.get(2)?,
                controls: row.get(3)?,
                category: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
