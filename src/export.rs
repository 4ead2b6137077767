use crate::models::{IntegratorApp, ToolCount};
use chrono::NaiveDate;

pub fn tools_csv(date: NaiveDate, tools: &[ToolCount]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([format!("Apps On: {date}"), "Count".to_string()])?;
    for tool in tools {
        writer.write_record([tool.name.as_str(), tool.count.to_string().as_str()])?;
    }

    finish(writer)
}

pub fn integrator_apps_csv(apps: &[IntegratorApp]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Name", "Rating", "Type", "Created"])?;
    for app in apps {
        writer.write_record([
            app.name.clone(),
            format!("{:.2}/5", app.rating),
            app.job_type.clone(),
            app.created.format("%m/%d/%Y").to_string(),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_csv_has_dated_header_and_quotes_commas() {
        let date = NaiveDate::from_ymd_opt(2013, 5, 7).unwrap();
        let tools = vec![
            ToolCount { name: "bwa".into(), count: 12 },
            ToolCount { name: "cut, paste".into(), count: 1 },
        ];

        let csv = tools_csv(date, &tools).unwrap();
        assert_eq!(csv, "Apps On: 2013-05-07,Count\nbwa,12\n\"cut, paste\",1\n");
    }

    #[test]
    fn integrator_apps_csv_lists_rating_and_creation_date() {
        let apps = vec![IntegratorApp {
            name: "blast".into(),
            description: "No description found".into(),
            wiki_url: None,
            rating: 4.3333,
            job_type: "executable".into(),
            created: NaiveDate::from_ymd_opt(2012, 11, 3).unwrap(),
        }];

        let csv = integrator_apps_csv(&apps).unwrap();
        assert_eq!(csv, "Name,Rating,Type,Created\nblast,4.33/5,executable,11/03/2012\n");
    }

    #[test]
    fn tools_csv_without_tools_is_header_only() {
        let date = NaiveDate::from_ymd_opt(2013, 5, 7).unwrap();
        assert_eq!(tools_csv(date, &[]).unwrap(), "Apps On: 2013-05-07,Count\n");
    }
}
