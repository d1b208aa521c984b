//! Expression errors.

use crate::constraint::ComparisonSense;
use crate::ids::VariableId;
use crate::shape::Shape;

/// Which operand of an operation (or which side of a constraint) an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Errors raised while validating or combining expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Variable was not created through an environment.
    UndefinedVariable,
    /// Monomial has a different number of exponents than variable factors.
    DegreeMismatch { degrees: usize, variables: usize },
    /// Polynomial without monomials.
    EmptyPolynomial,
    /// Vector without elements.
    EmptyVector,
    /// Matrix without elements.
    EmptyMatrix,
    /// Matrix row whose length differs from the first row.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Operand shapes are incompatible.
    DimensionMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },
    /// Two vector operands have incompatible lengths.
    VectorDimensionMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },
    /// Two matrix operands have incompatible shapes.
    MatrixDimensionMismatch {
        operation: &'static str,
        left: Shape,
        right: Shape,
    },
    /// Element access outside of the expression's shape.
    IndexOutOfBounds { row: usize, col: usize, shape: Shape },
    /// Operand kind not accepted by a polymorphic operation.
    UnsupportedInput {
        function: &'static str,
        input: String,
    },
    /// Power requested with a negative exponent.
    NegativeExponent { exponent: i64 },
    /// A constraint side (or expression) is not linear.
    LinearExpressionRequired {
        side: Option<Side>,
        expression: String,
    },
    /// Operation only applies to equality constraints.
    EqualityRequired { sense: ComparisonSense },
    /// Operation only applies to inequality constraints.
    InequalityRequired { sense: ComparisonSense },
    /// Linear coefficients of a constant need an explicit variable ordering.
    LinearCoefficientsUnavailable,
    /// Expression uses a variable that the supplied ordering does not list.
    VariableNotInOrdering { variable: VariableId },
    /// Evaluation point does not assign a value to a variable.
    UnassignedVariable { variable: VariableId },
    /// Implication needs constraints over exactly one variable.
    ImplicationRequiresSingleVariable { variables: usize },
    /// Implication needs both constraints to use the same variable.
    ImplicationVariableMismatch { left: VariableId, right: VariableId },
    /// An operand failed its validity check.
    InvalidOperand {
        operation: &'static str,
        side: Side,
        source: Box<ExprError>,
    },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::UndefinedVariable => "VARIABLE_UNDEFINED",
            ExprError::DegreeMismatch { .. } => "MONOMIAL_DEGREE_MISMATCH",
            ExprError::EmptyPolynomial => "POLYNOMIAL_EMPTY",
            ExprError::EmptyVector => "VECTOR_EMPTY",
            ExprError::EmptyMatrix => "MATRIX_EMPTY",
            ExprError::RaggedRow { .. } => "MATRIX_RAGGED_ROW",
            ExprError::DimensionMismatch { .. } => "SHAPE_MISMATCH",
            ExprError::VectorDimensionMismatch { .. } => "VECTOR_SHAPE_MISMATCH",
            ExprError::MatrixDimensionMismatch { .. } => "MATRIX_SHAPE_MISMATCH",
            ExprError::IndexOutOfBounds { .. } => "INDEX_OUT_OF_BOUNDS",
            ExprError::UnsupportedInput { .. } => "INPUT_UNSUPPORTED",
            ExprError::NegativeExponent { .. } => "EXPONENT_NEGATIVE",
            ExprError::LinearExpressionRequired { .. } => "LINEAR_EXPRESSION_REQUIRED",
            ExprError::EqualityRequired { .. } => "CONSTRAINT_EQUALITY_REQUIRED",
            ExprError::InequalityRequired { .. } => "CONSTRAINT_INEQUALITY_REQUIRED",
            ExprError::LinearCoefficientsUnavailable => "LINEAR_COEFFICIENTS_UNAVAILABLE",
            ExprError::VariableNotInOrdering { .. } => "VARIABLE_NOT_IN_ORDERING",
            ExprError::UnassignedVariable { .. } => "VARIABLE_UNASSIGNED",
            ExprError::ImplicationRequiresSingleVariable { .. } => {
                "IMPLICATION_SINGLE_VARIABLE_REQUIRED"
            }
            ExprError::ImplicationVariableMismatch { .. } => "IMPLICATION_VARIABLE_MISMATCH",
            ExprError::InvalidOperand { .. } => "OPERAND_INVALID",
        }
    }

    /// Innermost error, looking through operand wrappers.
    pub fn root_cause(&self) -> &ExprError {
        match self {
            ExprError::InvalidOperand { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Shapes and operation name carried by any shape-mismatch variant.
    pub fn shape_mismatch(&self) -> Option<(&'static str, Shape, Shape)> {
        match self {
            ExprError::DimensionMismatch {
                operation,
                left,
                right,
            }
            | ExprError::VectorDimensionMismatch {
                operation,
                left,
                right,
            }
            | ExprError::MatrixDimensionMismatch {
                operation,
                left,
                right,
            } => Some((operation, *left, *right)),
            _ => None,
        }
    }

    pub(crate) fn operand(operation: &'static str, side: Side, source: ExprError) -> Self {
        ExprError::InvalidOperand {
            operation,
            side,
            source: Box::new(source),
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.code();
        match self {
            ExprError::UndefinedVariable => write!(
                f,
                "[{code}] Variable is not well-defined; create it through an Environment"
            ),
            ExprError::DegreeMismatch { degrees, variables } => write!(
                f,
                "[{code}] the number of degrees ({degrees}) does not match the number of variables ({variables})"
            ),
            ExprError::EmptyPolynomial => write!(f, "[{code}] Polynomial has no monomials"),
            ExprError::EmptyVector => write!(f, "[{code}] Vector has no elements"),
            ExprError::EmptyMatrix => write!(f, "[{code}] Matrix has no elements"),
            ExprError::RaggedRow {
                row,
                expected,
                actual,
            } => write!(
                f,
                "[{code}] Row {row} has {actual} columns; expected {expected}"
            ),
            ExprError::DimensionMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "[{code}] Cannot {operation} expressions of shape {left} and {right}"
            ),
            ExprError::VectorDimensionMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "[{code}] Cannot {operation} vectors of shape {left} and {right}"
            ),
            ExprError::MatrixDimensionMismatch {
                operation,
                left,
                right,
            } => write!(
                f,
                "[{code}] Cannot {operation} matrices of shape {left} and {right}"
            ),
            ExprError::IndexOutOfBounds { row, col, shape } => write!(
                f,
                "[{code}] Index ({row}, {col}) is outside of shape {shape}"
            ),
            ExprError::UnsupportedInput { function, input } => {
                write!(f, "[{code}] {function} does not accept input of type {input}")
            }
            ExprError::NegativeExponent { exponent } => write!(
                f,
                "[{code}] Exponent must be non-negative (got {exponent})"
            ),
            ExprError::LinearExpressionRequired { side, expression } => match side {
                Some(side) => write!(
                    f,
                    "[{code}] The {} side of the constraint is not linear: {expression}",
                    side.as_str()
                ),
                None => write!(f, "[{code}] Expression is not linear: {expression}"),
            },
            ExprError::EqualityRequired { sense } => write!(
                f,
                "[{code}] Expected an equality constraint (got sense {})",
                sense.symbol()
            ),
            ExprError::InequalityRequired { sense } => write!(
                f,
                "[{code}] Expected an inequality constraint (got sense {})",
                sense.symbol()
            ),
            ExprError::LinearCoefficientsUnavailable => write!(
                f,
                "[{code}] Constant expression has no variables; supply a variable ordering"
            ),
            ExprError::VariableNotInOrdering { variable } => write!(
                f,
                "[{code}] Variable x_{variable} is missing from the variable ordering"
            ),
            ExprError::UnassignedVariable { variable } => {
                write!(f, "[{code}] No value assigned to variable x_{variable}")
            }
            ExprError::ImplicationRequiresSingleVariable { variables } => write!(
                f,
                "[{code}] Implication needs constraints on exactly one variable (found {variables})"
            ),
            ExprError::ImplicationVariableMismatch { left, right } => write!(
                f,
                "[{code}] Implication compares constraints on different variables (x_{left} and x_{right})"
            ),
            ExprError::InvalidOperand {
                operation,
                side,
                source,
            } => write!(
                f,
                "[{code}] The {} operand of {operation} is invalid: {source}",
                side.as_str()
            ),
        }
    }
}

impl std::error::Error for ExprError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExprError::InvalidOperand { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
