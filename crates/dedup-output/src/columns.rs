//! Output column layout.

use dedup_model::{Field, RECORD_TYPE_COLUMN};

/// Column names of the output table, in import order.
pub const OUTPUT_COLUMNS: [&str; 32] = [
    "Nombre",
    "Numero",
    "Agente",
    "Grupo",
    "General (SI/NO/MOD)",
    "Observaciones",
    "Numero2",
    "Numero3",
    "Fax",
    "Correo",
    "Base de Datos",
    "GESTION LISTADO PROPIO",
    "ENLACE LINKEDIN",
    "PUESTO",
    "TELEOPERADOR",
    "NUMERO DATO",
    "EMPRESA",
    "FECHA DE CONTACTO",
    "FECHA DE CONTACTO (NO USAR)",
    "FORMACION",
    "TITULACION",
    "EDAD",
    "CUALIFICA",
    "RESULTADO",
    "FECHA DE CITA",
    "FECHA DE CITA (NO USAR)",
    "CITA",
    "ORIGEN DATO",
    "ASESOR",
    "RESULTADO ASESOR",
    "OBSERVACIONES ASESOR",
    "BUSQUEDA FECHA",
];

/// How an output column is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Value of a canonical field.
    CopyField(Field),
    /// Value of a pass-through column, falling back to the record type.
    RecordType,
    /// `<DDMMYYYY><index>` per row.
    SequenceId,
    /// Constant batch label.
    BatchLabel,
    /// Run date as `DD/MM/YYYY`.
    SearchDate,
    /// Placeholder filled in later by the operators.
    Empty,
}

/// One output column and how it is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRule {
    pub column: &'static str,
    pub kind: RuleKind,
}

fn rule_kind(column: &str) -> RuleKind {
    match column {
        "Nombre" => RuleKind::CopyField(Field::FullName),
        "Numero" => RuleKind::CopyField(Field::Phone),
        "ENLACE LINKEDIN" => RuleKind::CopyField(Field::Link),
        "PUESTO" => RuleKind::CopyField(Field::Position),
        "EMPRESA" => RuleKind::CopyField(Field::Company),
        "NUMERO DATO" => RuleKind::SequenceId,
        "Base de Datos" => RuleKind::BatchLabel,
        "ORIGEN DATO" => RuleKind::RecordType,
        "BUSQUEDA FECHA" => RuleKind::SearchDate,
        _ => RuleKind::Empty,
    }
}

/// Rules for every output column, in column order.
pub fn output_rules() -> Vec<OutputRule> {
    OUTPUT_COLUMNS
        .into_iter()
        .map(|column| OutputRule {
            column,
            kind: rule_kind(column),
        })
        .collect()
}

impl OutputRule {
    /// Source column this rule reads, if any.
    pub fn source_column(&self) -> Option<&'static str> {
        match self.kind {
            RuleKind::CopyField(field) => Some(field.as_str()),
            RuleKind::RecordType => Some(RECORD_TYPE_COLUMN),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_column_names_unique() {
        let unique: BTreeSet<&str> = OUTPUT_COLUMNS.into_iter().collect();
        assert_eq!(unique.len(), OUTPUT_COLUMNS.len());
    }

    #[test]
    fn test_every_canonical_field_is_emitted_once() {
        let rules = output_rules();
        for field in Field::ALL {
            let count = rules
                .iter()
                .filter(|rule| rule.kind == RuleKind::CopyField(field))
                .count();
            assert_eq!(count, 1, "{field}");
        }
    }

    #[test]
    fn test_source_columns() {
        let rules = output_rules();
        let origin = rules.iter().find(|r| r.column == "ORIGEN DATO").unwrap();
        assert_eq!(origin.source_column(), Some("record_type"));
        let agent = rules.iter().find(|r| r.column == "Agente").unwrap();
        assert_eq!(agent.source_column(), None);
    }
}
