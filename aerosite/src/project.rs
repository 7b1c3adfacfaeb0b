//! Project: an ordered collection of sites with a size cap.

use std::collections::HashSet;

use aerosite_types::BoundingBox;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::AerositeError;
use crate::id::SiteId;
use crate::site::{create_default_site, duplicate_site, DuplicateOptions, Site, SiteOptions};

/// Maximum number of sites in one project.
pub const MAX_SITES_PER_PROJECT: usize = 10;

/// Ordered collection of at most [`MAX_SITES_PER_PROJECT`] sites.
///
/// Site `order` fields always match the position of the site in the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    sites: Vec<Site>,
}

impl TryFrom<Vec<Site>> for Project {
    type Error = AerositeError;

    fn try_from(sites: Vec<Site>) -> Result<Self, Self::Error> {
        if sites.len() > MAX_SITES_PER_PROJECT {
            return Err(AerositeError::TooManySites {
                max: MAX_SITES_PER_PROJECT,
            });
        }

        let mut ids = HashSet::new();
        for site in &sites {
            if !ids.insert(&site.id) {
                return Err(AerositeError::DuplicateSiteId(site.id.clone()));
            }
        }
        drop(ids);

        let mut project = Self { sites };
        project.renumber();
        Ok(project)
    }
}

impl<'de> Deserialize<'de> for Project {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawProject {
            #[serde(default)]
            sites: Vec<Site>,
        }

        let raw = RawProject::deserialize(deserializer)?;
        Self::try_from(raw.sites).map_err(serde::de::Error::custom)
    }
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sites in display order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Returns true if the project has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Returns true if no more sites can be added.
    pub fn is_full(&self) -> bool {
        self.sites.len() >= MAX_SITES_PER_PROJECT
    }

    /// Site with the given id.
    pub fn site(&self, id: &SiteId) -> Option<&Site> {
        self.sites.iter().find(|s| &s.id == id)
    }

    fn position(&self, id: &SiteId) -> Result<usize, AerositeError> {
        self.sites
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| AerositeError::SiteNotFound(id.clone()))
    }

    fn check_capacity(&self) -> Result<(), AerositeError> {
        if self.is_full() {
            warn!("Project is full, new site rejected");
            return Err(AerositeError::TooManySites {
                max: MAX_SITES_PER_PROJECT,
            });
        }

        Ok(())
    }

    fn renumber(&mut self) {
        for (index, site) in self.sites.iter_mut().enumerate() {
            site.order = index as u32;
        }
    }

    /// Appends the site at the end of the project. The site id must not be used in the project yet.
    pub fn add_site(mut self, site: Site) -> Result<Self, AerositeError> {
        self.check_capacity()?;
        if self.site(&site.id).is_some() {
            warn!("Site {} is already in the project", site.id);
            return Err(AerositeError::DuplicateSiteId(site.id));
        }

        debug!("Adding site {} to project", site.id);
        self.sites.push(site);
        self.renumber();
        Ok(self)
    }

    /// Creates a default site at the end of the project.
    pub fn create_site(self, options: SiteOptions) -> Result<Self, AerositeError> {
        let order = self.sites.len() as u32;
        let site = create_default_site(options.with_order(order));
        self.add_site(site)
    }

    /// Removes the site with the given id.
    pub fn remove_site(mut self, id: &SiteId) -> Result<Self, AerositeError> {
        let index = self.position(id)?;
        self.sites.remove(index);
        self.renumber();

        debug!("Removed site {id} from project");
        Ok(self)
    }

    /// Appends a copy of the site with the given id.
    pub fn duplicate_site(
        self,
        id: &SiteId,
        options: DuplicateOptions,
    ) -> Result<Self, AerositeError> {
        let index = self.position(id)?;
        self.check_capacity()?;

        let copy = duplicate_site(&self.sites[index], options);
        self.add_site(copy)
    }

    /// Replaces the site that has the same id as `site`.
    pub fn replace_site(mut self, site: Site) -> Result<Self, AerositeError> {
        let index = self.position(&site.id)?;
        self.sites[index] = site;
        self.renumber();
        Ok(self)
    }

    /// Moves a site from one position to another, shifting the sites in between.
    pub fn reorder_sites(mut self, from: usize, to: usize) -> Result<Self, AerositeError> {
        let len = self.sites.len();
        if let Some(index) = [from, to].into_iter().find(|i| *i >= len) {
            return Err(AerositeError::SiteIndexOutOfRange { index, len });
        }

        let site = self.sites.remove(from);
        self.sites.insert(to, site);
        self.renumber();
        Ok(self)
    }

    /// Bounding box of all sites.
    pub fn bounds(&self) -> Option<BoundingBox> {
        project_bounds(&self.sites)
    }
}

/// Bounding box of all map elements of all the sites. `None` if none of the sites has elements.
pub fn project_bounds(sites: &[Site]) -> Option<BoundingBox> {
    BoundingBox::merge_all(sites.iter().filter_map(Site::bounds))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::element::{create_map_marker, MarkerOptions};
    use crate::layer::ElementType;

    fn with_sites(count: usize) -> Project {
        (0..count).fold(Project::new(), |project, _| {
            project.create_site(SiteOptions::default()).unwrap()
        })
    }

    #[test]
    fn site_cap() {
        let project = with_sites(MAX_SITES_PER_PROJECT);
        assert!(project.is_full());
        assert_eq!(project.sites()[9].name, "Site 10");

        assert_matches!(
            project.clone().create_site(SiteOptions::default()),
            Err(AerositeError::TooManySites { max: 10 })
        );

        let first = project.sites()[0].id.clone();
        assert_matches!(
            project.clone().duplicate_site(&first, Default::default()),
            Err(AerositeError::TooManySites { .. })
        );

        let unknown = SiteId::from("site_unknown");
        assert_matches!(
            project.duplicate_site(&unknown, Default::default()),
            Err(AerositeError::SiteNotFound(id)) if id == unknown
        );
    }

    #[test]
    fn site_ids_are_unique() {
        let project = with_sites(1);
        let site = project.sites()[0].clone();
        assert_matches!(
            project.clone().add_site(site.clone()),
            Err(AerositeError::DuplicateSiteId(id)) if id == site.id
        );
        assert_eq!(project.len(), 1);

        assert_matches!(
            Project::try_from(vec![site.clone(), site.clone()]),
            Err(AerositeError::DuplicateSiteId(_))
        );

        let value = serde_json::json!({
            "sites": [serde_json::to_value(&site).unwrap(), serde_json::to_value(&site).unwrap()]
        });
        assert!(serde_json::from_value::<Project>(value).is_err());
    }

    #[test]
    fn remove_renumbers() {
        let project = with_sites(3);
        let middle = project.sites()[1].id.clone();
        let project = project.remove_site(&middle).unwrap();

        assert_eq!(project.len(), 2);
        assert_eq!(project.site(&middle), None);
        let orders: Vec<_> = project.sites().iter().map(|s| s.order).collect();
        assert_eq!(orders, [0, 1]);

        assert_matches!(
            project.remove_site(&middle),
            Err(AerositeError::SiteNotFound(_))
        );
    }

    #[test]
    fn reorder() {
        let project = with_sites(3);
        let ids: Vec<_> = project.sites().iter().map(|s| s.id.clone()).collect();
        let project = project.reorder_sites(0, 2).unwrap();

        let reordered: Vec<_> = project.sites().iter().map(|s| s.id.clone()).collect();
        assert_eq!(reordered, [ids[1].clone(), ids[2].clone(), ids[0].clone()]);
        assert_eq!(project.sites()[2].order, 2);
        assert_matches!(
            project.reorder_sites(0, 3),
            Err(AerositeError::SiteIndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn duplicate_appends_copy() {
        let project = with_sites(1);
        let id = project.sites()[0].id.clone();
        let project = project
            .duplicate_site(&id, DuplicateOptions::default())
            .unwrap();

        assert_eq!(project.len(), 2);
        assert_eq!(project.sites()[1].name, "Site 1 (Copy)");
        assert_eq!(project.sites()[1].order, 1);
    }

    #[test]
    fn bounds() {
        let project = with_sites(2);
        assert_eq!(project.bounds(), None);

        let site = project.sites()[1].clone();
        let site = site
            .place_marker(create_map_marker(
                2.0,
                3.0,
                MarkerOptions::new(ElementType::SiteLocation),
            ))
            .unwrap();
        let project = project.replace_site(site).unwrap();
        let bounds = project.bounds().unwrap();
        assert_eq!(bounds.center().lat, 3.0);
    }

    #[test]
    fn deserialization_enforces_cap() {
        let project = with_sites(MAX_SITES_PER_PROJECT);
        let mut value = serde_json::to_value(&project).unwrap();
        let extra = serde_json::to_value(create_default_site(SiteOptions::default())).unwrap();
        value["sites"].as_array_mut().unwrap().push(extra);

        assert!(serde_json::from_value::<Project>(value).is_err());

        let value = serde_json::to_value(&project).unwrap();
        let restored: Project = serde_json::from_value(value).unwrap();
        assert_eq!(restored, project);
    }
}
