//! Eingabevalidierung fuer gRPC-Requests
//!
//! Alle Verstoesse eines Requests werden gesammelt und als ein
//! `InvalidArgument` gemeldet, in der Reihenfolge der Felder.

use tonic::Status;
use validator::{Validate, ValidationError, ValidationErrors};

/// Validierte Felder eines Login-Requests
#[derive(Debug, Validate)]
pub struct LoginAnfrage {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(range(min = 1))]
    pub app_id: i64,
}

/// Validierte Felder eines Register-Requests
#[derive(Debug, Validate)]
pub struct RegisterAnfrage {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Validierte Felder eines IsAdmin-Requests
#[derive(Debug, Validate)]
pub struct IsAdminAnfrage {
    #[validate(range(min = 1))]
    pub user_id: i64,
}

impl LoginAnfrage {
    pub fn pruefen(&self) -> Result<(), Status> {
        pruefen(
            self,
            &[
                ("email", self.email.is_empty()),
                ("password", self.password.is_empty()),
                ("app_id", self.app_id == 0),
            ],
        )
    }
}

impl RegisterAnfrage {
    pub fn pruefen(&self) -> Result<(), Status> {
        pruefen(
            self,
            &[
                ("email", self.email.is_empty()),
                ("password", self.password.is_empty()),
            ],
        )
    }
}

impl IsAdminAnfrage {
    pub fn pruefen(&self) -> Result<(), Status> {
        pruefen(self, &[("user_id", self.user_id == 0)])
    }
}

/// `felder`: (Feldname, Feld ist leer) in Meldungsreihenfolge
fn pruefen<A: Validate>(anfrage: &A, felder: &[(&'static str, bool)]) -> Result<(), Status> {
    let fehler = match anfrage.validate() {
        Ok(()) => return Ok(()),
        Err(fehler) => fehler,
    };

    let meldungen = meldungen(&fehler, felder);
    Err(Status::invalid_argument(format!(
        "validation error: {}",
        meldungen.join(", ")
    )))
}

fn meldungen(fehler: &ValidationErrors, felder: &[(&'static str, bool)]) -> Vec<String> {
    let feld_fehler = fehler.field_errors();

    felder
        .iter()
        .filter_map(|&(feld, leer)| {
            let erster = feld_fehler.get(feld)?.first()?;
            Some(if leer {
                format!("Field {feld} is required")
            } else {
                meldung(feld, erster)
            })
        })
        .collect()
}

fn meldung(feld: &str, fehler: &ValidationError) -> String {
    match &*fehler.code {
        "email" => format!("Field {feld} is not valid"),
        "length" => {
            let min = fehler
                .params
                .get("min")
                .map(|wert| wert.to_string())
                .unwrap_or_default();
            format!("Field {feld} must be at least {min} characters long")
        }
        "range" => format!("Field {feld} must be greater than 0"),
        _ => format!("Field {feld} is not valid"),
    }
}
