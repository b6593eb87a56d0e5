//! The agreement record and its field selectors.

use serde::{Deserialize, Serialize};

/// Number of positional values that make up a full agreement
/// (identifier plus eleven mutable fields).
pub const FIELD_COUNT: usize = 12;

/// A loan agreement between a borrower and a lender.
///
/// Every field is an opaque string; amounts, rates, and dates are stored
/// exactly as supplied. `agreement_id` doubles as the ledger key.
///
/// Field declaration order is the wire order of the encoded record. Missing
/// fields decode to empty strings, so `{}` decodes to the zero record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agreement {
    pub agreement_id: String,
    pub borrower_name: String,
    pub lender_name: String,
    pub agreement_date: String,
    pub loan_amount: String,
    pub agreement_status: String,
    pub interest_rate: String,
    pub loan_duration: String,
    pub repayment_date: String,
    pub borrower_signed: String,
    pub lender_signed: String,
    pub comments: String,
}

impl Agreement {
    /// Returns `true` for the zero record (no identifier).
    ///
    /// A record without an identifier cannot have been written by the
    /// create path, so it never represents a live agreement.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.agreement_id.is_empty()
    }

    /// Builds the record that results from updating `self` with `changes`.
    ///
    /// Every mutable field is taken from `changes` one-to-one; the identifier
    /// is always kept from `self`.
    #[must_use]
    pub fn updated_with(&self, changes: Agreement) -> Agreement {
        Agreement {
            agreement_id: self.agreement_id.clone(),
            ..changes
        }
    }
}

/// Builds an agreement from its positional representation.
///
/// Positions: id, borrower, lender, agreement date, loan amount, status,
/// interest rate, duration, repayment date, borrower signed, lender signed,
/// comments. A vector of any other length is handed back unchanged.
impl TryFrom<Vec<String>> for Agreement {
    type Error = Vec<String>;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        let [agreement_id, borrower_name, lender_name, agreement_date, loan_amount, agreement_status, interest_rate, loan_duration, repayment_date, borrower_signed, lender_signed, comments]: [String; FIELD_COUNT] =
            values.try_into()?;

        Ok(Self {
            agreement_id,
            borrower_name,
            lender_name,
            agreement_date,
            loan_amount,
            agreement_status,
            interest_rate,
            loan_duration,
            repayment_date,
            borrower_signed,
            lender_signed,
            comments,
        })
    }
}

/// Selects one field of an [`Agreement`] for equality filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementField {
    AgreementId,
    BorrowerName,
    LenderName,
    AgreementDate,
    LoanAmount,
    AgreementStatus,
    InterestRate,
    LoanDuration,
    RepaymentDate,
    BorrowerSigned,
    LenderSigned,
    Comments,
}

impl AgreementField {
    /// All selectors, in wire order.
    pub const ALL: [AgreementField; FIELD_COUNT] = [
        Self::AgreementId,
        Self::BorrowerName,
        Self::LenderName,
        Self::AgreementDate,
        Self::LoanAmount,
        Self::AgreementStatus,
        Self::InterestRate,
        Self::LoanDuration,
        Self::RepaymentDate,
        Self::BorrowerSigned,
        Self::LenderSigned,
        Self::Comments,
    ];

    /// Wire name of the field in the encoded record.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AgreementId => "agreement_id",
            Self::BorrowerName => "borrower_name",
            Self::LenderName => "lender_name",
            Self::AgreementDate => "agreement_date",
            Self::LoanAmount => "loan_amount",
            Self::AgreementStatus => "agreement_status",
            Self::InterestRate => "interest_rate",
            Self::LoanDuration => "loan_duration",
            Self::RepaymentDate => "repayment_date",
            Self::BorrowerSigned => "borrower_signed",
            Self::LenderSigned => "lender_signed",
            Self::Comments => "comments",
        }
    }

    /// Borrows the selected field's value from `agreement`.
    #[must_use]
    pub fn value_of(self, agreement: &Agreement) -> &str {
        match self {
            Self::AgreementId => &agreement.agreement_id,
            Self::BorrowerName => &agreement.borrower_name,
            Self::LenderName => &agreement.lender_name,
            Self::AgreementDate => &agreement.agreement_date,
            Self::LoanAmount => &agreement.loan_amount,
            Self::AgreementStatus => &agreement.agreement_status,
            Self::InterestRate => &agreement.interest_rate,
            Self::LoanDuration => &agreement.loan_duration,
            Self::RepaymentDate => &agreement.repayment_date,
            Self::BorrowerSigned => &agreement.borrower_signed,
            Self::LenderSigned => &agreement.lender_signed,
            Self::Comments => &agreement.comments,
        }
    }

    /// Exact string equality against the selected field.
    #[must_use]
    pub fn matches(self, agreement: &Agreement, value: &str) -> bool {
        self.value_of(agreement) == value
    }
}

impl std::fmt::Display for AgreementField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
