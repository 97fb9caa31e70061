//! Server error code mapping.
//!
//! PostgreSQL reports the precise error category as a 5-character SQLSTATE
//! code. [`ServerErrorCode`] is the closed set of codes this layer
//! distinguishes; everything outside the set maps to [`ServerErrorCode::Unknown`]
//! rather than failing the mapping. The lookup is pure and static.

use std::fmt;

/// Named subset of SQLSTATE codes, with an `Unknown` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorCode {
    // Class 08 - connection exceptions
    ConnectionException,
    ConnectionDoesNotExist,
    ConnectionFailure,
    ProtocolViolation,
    // Class 0A
    FeatureNotSupported,
    // Class 21
    CardinalityViolation,
    // Class 22 - data exceptions
    DataException,
    NumericValueOutOfRange,
    NullValueNotAllowed,
    DivisionByZero,
    InvalidTextRepresentation,
    // Class 23 - integrity constraint violations
    IntegrityConstraintViolation,
    NotNullViolation,
    ForeignKeyViolation,
    UniqueViolation,
    CheckViolation,
    // Class 25
    InvalidTransactionState,
    // Class 28 - authorization
    InvalidAuthorizationSpecification,
    InvalidPassword,
    // Class 3D
    InvalidCatalogName,
    // Class 42 - syntax errors and access rule violations
    InsufficientPrivilege,
    SyntaxError,
    UndefinedColumn,
    UndefinedFunction,
    UndefinedTable,
    DuplicateTable,
    DatatypeMismatch,
    // Class 53 - insufficient resources
    InsufficientResources,
    DiskFull,
    OutOfMemory,
    TooManyConnections,
    // Class 57 - operator intervention
    AdminShutdown,
    CrashShutdown,
    CannotConnectNow,
    // Class XX
    InternalError,
    /// Any code outside the known set.
    Unknown,
}

impl ServerErrorCode {
    /// Map a raw 5-character SQLSTATE code to its named value.
    ///
    /// Total over all inputs: unmapped codes become [`ServerErrorCode::Unknown`].
    pub fn from_code(code: &str) -> Self {
        use ServerErrorCode::*;
        match code {
            "08000" => ConnectionException,
            "08003" => ConnectionDoesNotExist,
            "08006" => ConnectionFailure,
            "08P01" => ProtocolViolation,
            "0A000" => FeatureNotSupported,
            "21000" => CardinalityViolation,
            "22000" => DataException,
            "22003" => NumericValueOutOfRange,
            "22004" => NullValueNotAllowed,
            "22012" => DivisionByZero,
            "22P02" => InvalidTextRepresentation,
            "23000" => IntegrityConstraintViolation,
            "23502" => NotNullViolation,
            "23503" => ForeignKeyViolation,
            "23505" => UniqueViolation,
            "23514" => CheckViolation,
            "25000" => InvalidTransactionState,
            "28000" => InvalidAuthorizationSpecification,
            "28P01" => InvalidPassword,
            "3D000" => InvalidCatalogName,
            "42501" => InsufficientPrivilege,
            "42601" => SyntaxError,
            "42703" => UndefinedColumn,
            "42883" => UndefinedFunction,
            "42P01" => UndefinedTable,
            "42P07" => DuplicateTable,
            "42804" => DatatypeMismatch,
            "53000" => InsufficientResources,
            "53100" => DiskFull,
            "53200" => OutOfMemory,
            "53300" => TooManyConnections,
            "57P01" => AdminShutdown,
            "57P02" => CrashShutdown,
            "57P03" => CannotConnectNow,
            "XX000" => InternalError,
            _ => Unknown,
        }
    }

    /// The raw SQLSTATE code for a known variant, `None` for [`ServerErrorCode::Unknown`].
    pub fn as_code(&self) -> Option<&'static str> {
        use ServerErrorCode::*;
        let code = match self {
            ConnectionException => "08000",
            ConnectionDoesNotExist => "08003",
            ConnectionFailure => "08006",
            ProtocolViolation => "08P01",
            FeatureNotSupported => "0A000",
            CardinalityViolation => "21000",
            DataException => "22000",
            NumericValueOutOfRange => "22003",
            NullValueNotAllowed => "22004",
            DivisionByZero => "22012",
            InvalidTextRepresentation => "22P02",
            IntegrityConstraintViolation => "23000",
            NotNullViolation => "23502",
            ForeignKeyViolation => "23503",
            UniqueViolation => "23505",
            CheckViolation => "23514",
            InvalidTransactionState => "25000",
            InvalidAuthorizationSpecification => "28000",
            InvalidPassword => "28P01",
            InvalidCatalogName => "3D000",
            InsufficientPrivilege => "42501",
            SyntaxError => "42601",
            UndefinedColumn => "42703",
            UndefinedFunction => "42883",
            UndefinedTable => "42P01",
            DuplicateTable => "42P07",
            DatatypeMismatch => "42804",
            InsufficientResources => "53000",
            DiskFull => "53100",
            OutOfMemory => "53200",
            TooManyConnections => "53300",
            AdminShutdown => "57P01",
            CrashShutdown => "57P02",
            CannotConnectNow => "57P03",
            InternalError => "XX000",
            Unknown => return None,
        };
        Some(code)
    }
}

impl fmt::Display for ServerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_code() {
            Some(code) => write!(f, "{:?} ({})", self, code),
            None => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("08006", ServerErrorCode::ConnectionFailure)]
    #[case("22012", ServerErrorCode::DivisionByZero)]
    #[case("23505", ServerErrorCode::UniqueViolation)]
    #[case("28P01", ServerErrorCode::InvalidPassword)]
    #[case("3D000", ServerErrorCode::InvalidCatalogName)]
    #[case("42601", ServerErrorCode::SyntaxError)]
    #[case("42P01", ServerErrorCode::UndefinedTable)]
    #[case("57P01", ServerErrorCode::AdminShutdown)]
    #[case("XX000", ServerErrorCode::InternalError)]
    fn test_from_code_known(#[case] raw: &str, #[case] expected: ServerErrorCode) {
        assert_eq!(ServerErrorCode::from_code(raw), expected);
    }

    #[rstest]
    #[case("99999")]
    #[case("ZZZZZ")]
    #[case("")]
    #[case("22012X")]
    fn test_from_code_unknown_fallback(#[case] raw: &str) {
        assert_eq!(ServerErrorCode::from_code(raw), ServerErrorCode::Unknown);
    }

    #[rstest]
    #[case(ServerErrorCode::ConnectionFailure)]
    #[case(ServerErrorCode::DivisionByZero)]
    #[case(ServerErrorCode::UniqueViolation)]
    #[case(ServerErrorCode::UndefinedTable)]
    #[case(ServerErrorCode::CannotConnectNow)]
    fn test_mapping_is_bidirectional(#[case] code: ServerErrorCode) {
        let raw = code.as_code().unwrap();
        assert_eq!(ServerErrorCode::from_code(raw), code);
    }

    #[test]
    fn test_unknown_has_no_raw_code() {
        assert_eq!(ServerErrorCode::Unknown.as_code(), None);
    }

    #[test]
    fn test_display_includes_code() {
        let shown = ServerErrorCode::DivisionByZero.to_string();
        assert!(shown.contains("22012"));
        assert_eq!(ServerErrorCode::Unknown.to_string(), "Unknown");
    }
}
