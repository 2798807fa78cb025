//! Named, typed accessors over the generic attribute table.
//!
//! Each accessor family is `x()`, `set_x(..)`, `is_set_x()` and `unset_x()`.
//! Getters return the type default when unset; setters apply the same
//! level/version gating and syntax checks as [`SedElement::set`].

use log::trace;

use crate::core::identifiers::{format_kisao_id, parse_kisao_id};
use crate::core::KisaoTerms;
use crate::model::element::SedElement;
use crate::model::error::OperationError;

macro_rules! string_attribute {
    ($($attr:literal => $get:ident, $set:ident, $is_set:ident, $unset:ident;)*) => {
        $(
            pub fn $get(&self) -> &str {
                self.string($attr)
            }

            pub fn $set(&mut self, value: &str) -> Result<(), OperationError> {
                self.set($attr, value)
            }

            pub fn $is_set(&self) -> bool {
                self.is_set($attr)
            }

            pub fn $unset(&mut self) -> Result<(), OperationError> {
                self.unset($attr)
            }
        )*
    };
}

macro_rules! typed_attribute {
    ($ty:ty, $getter:ident; $($attr:literal => $get:ident, $set:ident, $is_set:ident, $unset:ident;)*) => {
        $(
            pub fn $get(&self) -> $ty {
                self.$getter($attr)
            }

            pub fn $set(&mut self, value: $ty) -> Result<(), OperationError> {
                self.set($attr, value)
            }

            pub fn $is_set(&self) -> bool {
                self.is_set($attr)
            }

            pub fn $unset(&mut self) -> Result<(), OperationError> {
                self.unset($attr)
            }
        )*
    };
}

impl SedElement {
    string_attribute! {
        "id" => id, set_id, is_set_id, unset_id;
        "name" => name, set_name, is_set_name, unset_name;
        "metaid" => metaid, set_metaid, is_set_metaid, unset_metaid;
        "source" => source, set_source, is_set_source, unset_source;
        "language" => language, set_language, is_set_language, unset_language;
        "format" => format, set_format, is_set_format, unset_format;
        "target" => target, set_target, is_set_target, unset_target;
        "newValue" => new_value, set_new_value, is_set_new_value, unset_new_value;
        "symbol" => symbol, set_symbol, is_set_symbol, unset_symbol;
        "modelReference" => model_reference, set_model_reference, is_set_model_reference, unset_model_reference;
        "simulationReference" => simulation_reference, set_simulation_reference, is_set_simulation_reference, unset_simulation_reference;
        "taskReference" => task_reference, set_task_reference, is_set_task_reference, unset_task_reference;
        "task" => task, set_task, is_set_task, unset_task;
        "range" => range, set_range, is_set_range, unset_range;
        "dataReference" => data_reference, set_data_reference, is_set_data_reference, unset_data_reference;
        "xDataReference" => x_data_reference, set_x_data_reference, is_set_x_data_reference, unset_x_data_reference;
        "yDataReference" => y_data_reference, set_y_data_reference, is_set_y_data_reference, unset_y_data_reference;
        "zDataReference" => z_data_reference, set_z_data_reference, is_set_z_data_reference, unset_z_data_reference;
        "label" => label, set_label, is_set_label, unset_label;
        "style" => style, set_style, is_set_style, unset_style;
        "baseStyle" => base_style, set_base_style, is_set_base_style, unset_base_style;
        "color" => color, set_color, is_set_color, unset_color;
        "type" => type_, set_type, is_set_type, unset_type;
        "plot" => plot, set_plot, is_set_plot, unset_plot;
    }

    typed_attribute! {
        i32, int;
        "order" => order, set_order, is_set_order, unset_order;
        "numberOfPoints" => number_of_points, set_number_of_points, is_set_number_of_points, unset_number_of_points;
        "numberOfSteps" => number_of_steps, set_number_of_steps, is_set_number_of_steps, unset_number_of_steps;
        "numRows" => num_rows, set_num_rows, is_set_num_rows, unset_num_rows;
        "numCols" => num_cols, set_num_cols, is_set_num_cols, unset_num_cols;
        "row" => row, set_row, is_set_row, unset_row;
        "col" => col, set_col, is_set_col, unset_col;
    }

    typed_attribute! {
        f64, double;
        "initialTime" => initial_time, set_initial_time, is_set_initial_time, unset_initial_time;
        "outputStartTime" => output_start_time, set_output_start_time, is_set_output_start_time, unset_output_start_time;
        "outputEndTime" => output_end_time, set_output_end_time, is_set_output_end_time, unset_output_end_time;
        "step" => step, set_step, is_set_step, unset_step;
        "start" => start, set_start, is_set_start, unset_start;
        "end" => end, set_end, is_set_end, unset_end;
        "min" => min, set_min, is_set_min, unset_min;
        "max" => max, set_max, is_set_max, unset_max;
        "thickness" => thickness, set_thickness, is_set_thickness, unset_thickness;
    }

    typed_attribute! {
        bool, boolean;
        "resetModel" => reset_model, set_reset_model, is_set_reset_model, unset_reset_model;
        "concatenate" => concatenate, set_concatenate, is_set_concatenate, unset_concatenate;
        "logX" => log_x, set_log_x, is_set_log_x, unset_log_x;
        "logY" => log_y, set_log_y, is_set_log_y, unset_log_y;
        "logZ" => log_z, set_log_z, is_set_log_z, unset_log_z;
        "legend" => legend, set_legend, is_set_legend, unset_legend;
        "grid" => grid, set_grid, is_set_grid, unset_grid;
        "reverse" => reverse, set_reverse, is_set_reverse, unset_reverse;
    }

    /// The `kisaoID` attribute in `KISAO:nnnnnnn` form, or `""`.
    pub fn kisao_id(&self) -> &str {
        self.string("kisaoID")
    }

    /// The numeric part of `kisaoID`, if set and well formed.
    pub fn kisao_id_number(&self) -> Option<u32> {
        parse_kisao_id(self.kisao_id()).ok()
    }

    pub fn is_set_kisao_id(&self) -> bool {
        self.is_set("kisaoID")
    }

    pub fn unset_kisao_id(&mut self) -> Result<(), OperationError> {
        self.unset("kisaoID")
    }

    /// Set `kisaoID`, naming the element from the builtin term table.
    pub fn set_kisao_id(&mut self, kisao_id: &str) -> Result<(), OperationError> {
        self.set_kisao_id_with(kisao_id, KisaoTerms::builtin())
    }

    /// Set `kisaoID`; when `name` is unset and legal here, fill it from `terms`.
    pub fn set_kisao_id_with(
        &mut self,
        kisao_id: &str,
        terms: &KisaoTerms,
    ) -> Result<(), OperationError> {
        self.set("kisaoID", kisao_id)?;
        if !self.is_set("name") {
            if let Some(label) = terms.name_for_id(kisao_id) {
                if let Err(e) = self.set("name", label) {
                    trace!("not naming <{}> from KiSAO: {}", self.kind().tag(), e);
                }
            }
        }
        Ok(())
    }

    pub fn set_kisao_id_number(&mut self, term: u32) -> Result<(), OperationError> {
        self.set_kisao_id_with(&format_kisao_id(term), KisaoTerms::builtin())
    }

    pub fn set_kisao_id_number_with(
        &mut self,
        term: u32,
        terms: &KisaoTerms,
    ) -> Result<(), OperationError> {
        self.set_kisao_id_with(&format_kisao_id(term), terms)
    }
}
