use fcprep_core::{Conversation, ConvertError, ConvertedRecord, DatasetFormat};

use crate::{ConversationConverter, ConversionConfig, ErrorPolicy, FormatConverter};

/// Applies one [`FormatConverter`] to every record of a dataset, preserving order.
#[derive(Clone, Debug)]
pub struct BatchConverter {
    converter: FormatConverter,
    error_policy: ErrorPolicy,
}

impl BatchConverter {
    pub fn new(format: DatasetFormat, config: ConversionConfig) -> Self {
        let error_policy = config.error_policy();
        Self {
            converter: FormatConverter::for_format(format, config),
            error_policy,
        }
    }

    /// Resolves a format by name. Unknown names fail with
    /// [`ConvertError::UnsupportedFormat`].
    pub fn from_format_name(name: &str, config: ConversionConfig) -> Result<Self, ConvertError> {
        Ok(Self::new(name.parse()?, config))
    }

    pub fn format(&self) -> DatasetFormat {
        self.converter.format()
    }

    fn convert_one(
        &self,
        index: usize,
        conversation: &Conversation,
    ) -> Result<ConvertedRecord, ConvertError> {
        let record = self
            .converter
            .convert(conversation)
            .map_err(|err| err.in_record(index))?;
        tracing::debug!(
            record = index,
            messages = record.messages.len(),
            tools = record.tools.len(),
            "converted record"
        );
        Ok(record)
    }

    /// Handles one failed record according to the error policy.
    fn recover(&self, err: ConvertError) -> Result<(), ConvertError> {
        match self.error_policy {
            ErrorPolicy::Abort => Err(err),
            ErrorPolicy::SkipAndLog => {
                let index = match &err {
                    ConvertError::Record { index, .. } => Some(*index),
                    _ => None,
                };
                tracing::warn!(record = ?index, error = %err.root(), "skipping record");
                Ok(())
            }
        }
    }

    /// Converts every record in input order. Output `i` derives from input `i` unless a
    /// record was skipped under [`ErrorPolicy::SkipAndLog`].
    #[cfg(not(feature = "parallel"))]
    pub fn convert<I>(&self, records: I) -> Result<Vec<ConvertedRecord>, ConvertError>
    where
        I: IntoIterator<Item = Conversation>,
    {
        let records = records.into_iter();
        let mut converted = Vec::with_capacity(records.size_hint().0);
        for (index, conversation) in records.enumerate() {
            match self.convert_one(index, &conversation) {
                Ok(record) => converted.push(record),
                Err(err) => self.recover(err)?,
            }
        }
        tracing::debug!(
            format = %self.format(),
            converted = converted.len(),
            "batch conversion finished"
        );
        Ok(converted)
    }

    /// Converts every record in input order. Output `i` derives from input `i` unless a
    /// record was skipped under [`ErrorPolicy::SkipAndLog`].
    ///
    /// Records are converted on the rayon pool; the indexed collect keeps input order,
    /// and under [`ErrorPolicy::Abort`] the lowest-index failure is returned.
    #[cfg(feature = "parallel")]
    pub fn convert<I>(&self, records: I) -> Result<Vec<ConvertedRecord>, ConvertError>
    where
        I: IntoIterator<Item = Conversation>,
    {
        use rayon::prelude::*;

        let records: Vec<Conversation> = records.into_iter().collect();
        let results: Vec<Result<ConvertedRecord, ConvertError>> = records
            .par_iter()
            .enumerate()
            .map(|(index, conversation)| self.convert_one(index, conversation))
            .collect();

        let mut converted = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(record) => converted.push(record),
                Err(err) => self.recover(err)?,
            }
        }
        tracing::debug!(
            format = %self.format(),
            converted = converted.len(),
            "batch conversion finished"
        );
        Ok(converted)
    }
}

/// Converts a whole dataset to `format`.
pub fn convert<I>(
    records: I,
    config: &ConversionConfig,
    format: DatasetFormat,
) -> Result<Vec<ConvertedRecord>, ConvertError>
where
    I: IntoIterator<Item = Conversation>,
{
    BatchConverter::new(format, config.clone()).convert(records)
}

/// Like [`convert`], with the format given by name. The name is resolved before any
/// record is read.
pub fn convert_named<I>(
    records: I,
    config: &ConversionConfig,
    format: &str,
) -> Result<Vec<ConvertedRecord>, ConvertError>
where
    I: IntoIterator<Item = Conversation>,
{
    BatchConverter::from_format_name(format, config.clone())?.convert(records)
}
