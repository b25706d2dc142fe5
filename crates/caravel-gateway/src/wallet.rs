//! # Wallet and Enrollment
//!
//! Credential storage and the certificate-authority seam. A
//! [`Credential`] is what an enrolled identity looks like at rest; a
//! [`CredentialStore`] holds them; a [`CertificateAuthority`] mints
//! them. The filesystem wallet stores one JSON file per identity, the
//! same shape on disk as in memory.
//!
//! ## Enrollment Flow
//!
//! Bootstrap order is fixed: [`enroll_admin`] first (the CA's
//! pre-registered admin), then [`register_user`] per application
//! identity, which registers against the CA as the admin and enrolls
//! with the returned secret. Both refuse to clobber an existing wallet
//! entry.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use caravel_core::LedgerError;

/// An enrolled identity: certificate and key material plus the MSP it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Wallet label the credential is stored under.
    pub name: String,
    /// Membership service provider the identity belongs to.
    pub msp_id: String,
    /// PEM-encoded enrollment certificate.
    pub certificate: String,
    /// PEM-encoded private key.
    pub private_key: String,
    /// When the CA issued this credential.
    pub enrolled_at: DateTime<Utc>,
}

/// Storage for enrolled credentials, keyed by identity name.
pub trait CredentialStore {
    /// Fetch the credential stored under `name`, if any.
    fn lookup(&self, name: &str) -> Result<Option<Credential>, LedgerError>;

    /// Persist `credential` under its own name, overwriting.
    fn store(&mut self, credential: &Credential) -> Result<(), LedgerError>;

    /// Whether an entry exists under `name`.
    fn exists(&self, name: &str) -> Result<bool, LedgerError> {
        Ok(self.lookup(name)?.is_some())
    }

    /// Names of all stored identities, sorted.
    fn list(&self) -> Result<Vec<String>, LedgerError>;
}

/// Issues credentials and registers identities.
///
/// The dev implementation below fakes the cryptography; a production
/// implementation would wrap a real CA client behind this same trait.
pub trait CertificateAuthority {
    /// Exchange an enrollment secret for a credential.
    fn enroll(&mut self, name: &str, secret: &str) -> Result<Credential, LedgerError>;

    /// Register a new identity and return its enrollment secret.
    fn register(
        &mut self,
        name: &str,
        affiliation: &str,
        role: &str,
    ) -> Result<String, LedgerError>;
}

/// Filesystem wallet: one `<name>.json` file per identity under a
/// single directory.
#[derive(Debug, Clone)]
pub struct FsWallet {
    dir: PathBuf,
}

impl FsWallet {
    /// Open (and create if absent) a wallet directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory this wallet persists into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, name: &str) -> Result<PathBuf, LedgerError> {
        validate_identity_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }
}

/// Identity names become file names, so only a conservative character
/// set is accepted.
fn validate_identity_name(name: &str) -> Result<(), LedgerError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(LedgerError::Validation(format!(
            "invalid identity name '{name}': only alphanumerics, '.', '_' and '-' are allowed"
        )))
    }
}

impl CredentialStore for FsWallet {
    fn lookup(&self, name: &str) -> Result<Option<Credential>, LedgerError> {
        let path = self.entry_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn store(&mut self, credential: &Credential) -> Result<(), LedgerError> {
        let path = self.entry_path(&credential.name)?;
        let json = serde_json::to_vec_pretty(credential)?;
        fs::write(&path, json)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, LedgerError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// The CA's bootstrap admin identity.
pub const ADMIN_NAME: &str = "admin";
/// The bootstrap admin's pre-registered enrollment secret.
pub const ADMIN_SECRET: &str = "adminpw";

/// An in-process certificate authority for the dev sandbox.
///
/// Ships with the `admin`/`adminpw` registration pre-seeded.
/// Certificates and keys are deterministic stand-ins derived from the
/// identity name, which keeps enrollment testable without key
/// generation.
#[derive(Debug, Clone)]
pub struct DevCertificateAuthority {
    msp_id: String,
    registrations: Vec<(String, String)>,
}

impl DevCertificateAuthority {
    /// A CA issuing credentials for `msp_id`.
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            registrations: vec![(ADMIN_NAME.to_string(), ADMIN_SECRET.to_string())],
        }
    }

    fn pem_stub(kind: &str, name: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(kind.as_bytes());
        hasher.update(name.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        format!("-----BEGIN {kind}-----\n{hex}\n-----END {kind}-----\n")
    }
}

impl Default for DevCertificateAuthority {
    fn default() -> Self {
        Self::new("DevMSP")
    }
}

impl CertificateAuthority for DevCertificateAuthority {
    fn enroll(&mut self, name: &str, secret: &str) -> Result<Credential, LedgerError> {
        let registered = self
            .registrations
            .iter()
            .any(|(n, s)| n == name && s == secret);
        if !registered {
            return Err(LedgerError::Validation(format!(
                "enrollment rejected for '{name}': unknown identity or wrong secret"
            )));
        }
        Ok(Credential {
            name: name.to_string(),
            msp_id: self.msp_id.clone(),
            certificate: Self::pem_stub("CERTIFICATE", name),
            private_key: Self::pem_stub("PRIVATE KEY", name),
            enrolled_at: Utc::now(),
        })
    }

    fn register(
        &mut self,
        name: &str,
        _affiliation: &str,
        _role: &str,
    ) -> Result<String, LedgerError> {
        validate_identity_name(name)?;
        if self.registrations.iter().any(|(n, _)| n == name) {
            return Err(LedgerError::Validation(format!(
                "identity '{name}' is already registered"
            )));
        }
        let secret = uuid::Uuid::new_v4().to_string();
        self.registrations.push((name.to_string(), secret.clone()));
        Ok(secret)
    }
}

/// Enroll the CA's bootstrap admin into the wallet.
///
/// Refuses to overwrite an existing admin entry.
pub fn enroll_admin(
    wallet: &mut dyn CredentialStore,
    ca: &mut dyn CertificateAuthority,
) -> Result<Credential, LedgerError> {
    if wallet.exists(ADMIN_NAME)? {
        return Err(LedgerError::Validation(format!(
            "identity '{ADMIN_NAME}' already exists in the wallet"
        )));
    }
    let credential = ca.enroll(ADMIN_NAME, ADMIN_SECRET)?;
    wallet.store(&credential)?;
    tracing::info!(name = ADMIN_NAME, "enrolled admin identity");
    Ok(credential)
}

/// Register and enroll an application identity.
///
/// Requires an enrolled admin in the wallet and refuses duplicate
/// names.
pub fn register_user(
    wallet: &mut dyn CredentialStore,
    ca: &mut dyn CertificateAuthority,
    name: &str,
    affiliation: &str,
) -> Result<Credential, LedgerError> {
    if wallet.exists(name)? {
        return Err(LedgerError::Validation(format!(
            "identity '{name}' already exists in the wallet"
        )));
    }
    if !wallet.exists(ADMIN_NAME)? {
        return Err(LedgerError::IdentityNotFound {
            name: ADMIN_NAME.to_string(),
        });
    }
    let secret = ca.register(name, affiliation, "client")?;
    let credential = ca.enroll(name, &secret)?;
    wallet.store(&credential)?;
    tracing::info!(name, affiliation, "registered and enrolled identity");
    Ok(credential)
}
